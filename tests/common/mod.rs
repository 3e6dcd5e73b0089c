use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::Error;
use std::path::Path;

const WORK_BASES: [&str; 5] = ["800", "400", "4500", "300", "999"];
const DEADLINES: [&str; 7] = [
    "1",
    "1.2",
    "1.5",
    "2",
    "-1",
    "soon",
    // Parses as a number but would overflow a reprice if it were accepted.
    "9999999999999999999999999999",
];
const FAQ_ITEMS: [&str; 5] = [
    "faq-price",
    "faq-deadlines",
    "faq-guarantees",
    "faq-revisions",
    "faq-nonsense",
];
const EMAILS: [&str; 3] = ["anna@example.com", "broken@mail", ""];

/// Writes a seeded random session script: valid interactions, hostile
/// control values and time jumps, in arbitrary order.
pub fn generate_storm_script(path: &Path, rows: usize, seed: u64) -> Result<(), Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["event", "target", "value"])?;

    for _ in 0..rows {
        let row: [String; 3] = match rng.gen_range(0..13) {
            0 => row("click", "menu", ""),
            1 => row("click", "open:orderModal", ""),
            2 => row("click", "open:consultModal", ""),
            3 => row("click", "modal:orderModal", ""),
            4 => row("keydown", "", "Escape"),
            5 => row("click", &format!("faq:{}", pick(&mut rng, &FAQ_ITEMS)), ""),
            6 => row("input", "calc:pages", &rng.gen_range(0..150).to_string()),
            7 => row("change", "calc:work", pick(&mut rng, &WORK_BASES)),
            8 => row("change", "calc:deadline", pick(&mut rng, &DEADLINES)),
            9 => row("input", "order:email", pick(&mut rng, &EMAILS)),
            10 => row("submit", "form:order", ""),
            11 => row("advance", "", &rng.gen_range(0..4000u64).to_string()),
            _ => row("click", "anchor:#faq", ""),
        };
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn row(event: &str, target: &str, value: &str) -> [String; 3] {
    [event.to_string(), target.to_string(), value.to_string()]
}

fn pick<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}
