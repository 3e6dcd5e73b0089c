use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

/// Replays the rows under the standard header and returns the assertion
/// handle for the finished run.
fn run_script(rows: &[&str]) -> assert_cmd::assert::Assert {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "event,target,value").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(file.path());
    cmd.assert()
}

#[test]
fn test_faq_accordion_last_click_wins() {
    run_script(&["click,faq:faq-price,", "click,faq:faq-deadlines,"])
        .success()
        .stdout(predicate::str::contains("faq_active,faq-deadlines"));
}

#[test]
fn test_faq_second_click_closes_the_item() {
    run_script(&["click,faq:faq-price,", "click,faq:faq-price,"])
        .success()
        .stdout(predicate::str::contains("faq_active,\n"));
}

#[test]
fn test_escape_closes_every_modal() {
    run_script(&[
        "click,open:orderModal,",
        "click,open:consultModal,",
        "keydown,,Escape",
    ])
    .success()
    .stdout(predicate::str::contains("open_modals,\n"))
    .stdout(predicate::str::contains("scroll_locked,false"));
}

#[test]
fn test_backdrop_click_closes_one_modal_and_the_lock() {
    // The page keeps a single overflow flag, so closing either modal
    // releases the lock even while the other stays up.
    run_script(&[
        "click,open:orderModal,",
        "click,open:consultModal,",
        "click,modal:consultModal,",
    ])
    .success()
    .stdout(predicate::str::contains("open_modals,orderModal\n"))
    .stdout(predicate::str::contains("scroll_locked,false"));
}

#[test]
fn test_focus_settles_on_the_first_control() {
    run_script(&["click,open:orderModal,", "advance,,300"])
        .success()
        .stdout(predicate::str::contains("focused,orderModal:name"));
}

#[test]
fn test_submit_stays_in_flight_until_time_passes() {
    run_script(&[
        "click,open:orderModal,",
        "input,order:name,Анна",
        "input,order:email,anna@example.com",
        "input,order:phone,+7 912 345 67 89",
        "submit,form:order,",
    ])
    .success()
    .stdout(predicate::str::contains("form_phase,submitting"))
    .stdout(predicate::str::contains("open_modals,orderModal"))
    .stdout(predicate::str::contains("notification,\n"));
}

#[test]
fn test_missing_fields_keep_the_form_idle() {
    // The message itself holds a comma, so the report quotes the field.
    run_script(&["click,open:orderModal,", "submit,form:order,"])
        .success()
        .stdout(predicate::str::contains("form_phase,idle"))
        .stdout(predicate::str::contains(
            r#"notification,"error: Пожалуйста, заполните все обязательные поля""#,
        ));
}

#[test]
fn test_invalid_phone_gets_its_own_message() {
    run_script(&[
        "input,order:name,Анна",
        "input,order:email,anna@example.com",
        "input,order:phone,123",
        "submit,form:order,",
    ])
    .success()
    .stdout(predicate::str::contains(
        r#"notification,"error: Пожалуйста, введите корректный номер телефона""#,
    ));
}

#[test]
fn test_error_toast_expires_but_stays_in_the_log() {
    // 5300ms covers the five second display plus the 300ms exit.
    run_script(&["submit,form:order,", "advance,,5300"])
        .success()
        .stdout(predicate::str::contains("notification,\n"))
        .stdout(predicate::str::contains(
            r#"notice:1,"error: Пожалуйста, заполните все обязательные поля""#,
        ));
}

#[test]
fn test_price_floor_binds_for_short_essays() {
    run_script(&["change,calc:work,400", "input,calc:pages,3"])
        .success()
        // 25 x 3 stays under the 400 floor.
        .stdout(predicate::str::contains("price,400 ₽"))
        .stdout(predicate::str::contains("pages,3"));
}

#[test]
fn test_runaway_deadline_row_cannot_crash_the_session() {
    // A well-formed row whose factor would overflow the reprice if it were
    // accepted; it must be dropped like any other garbage value.
    run_script(&[
        "change,calc:deadline,9999999999999999999999999999",
        "input,calc:pages,20",
    ])
    .success()
    .stdout(predicate::str::contains("price,800 ₽"))
    .stdout(predicate::str::contains("pages,20"));
}
