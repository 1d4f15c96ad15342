//! Signup Example
//!
//! Builds a small signup form, validates a posted body and prints the
//! resulting markup:
//! - `#[derive(FieldSet)]` over plain field values
//! - form-level rules next to field rules
//! - a date range and an address composite
//!
//! Pass a urlencoded body as the first argument to simulate a post, e.g.
//! `cargo run --example signup -- "name=Jo&email=jo@example.com"`.

use std::fs::File;

use formwork::prelude::*;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// ============================================================================
// Fields
// ============================================================================

#[derive(FieldSet)]
struct Signup {
    name: FieldNode,
    email: FieldNode,
    plan: FieldNode,
    stay: DateRange,
    address: Address,
    submit: FieldNode,
}

fn build(cx: &FormContext) -> Result<Signup, FormError> {
    let mut name = cx.text("name", None);
    name.set_label("Name").set_required(true);

    let mut email = cx.email("email", None);
    email.set_label("E-mail").set_required(true);
    email.add_validation("email")?;

    let mut plan = cx.radio("plan", ["basic", "plus"]);
    plan.set_label("Plan").set_selected("basic");

    let mut stay = cx.date_range("stay", None, None);
    stay.set_labels("Staying from", "until");

    let mut address = cx.address("address");
    address.set_label("Address");

    Ok(Signup {
        name,
        email,
        plan,
        stay,
        address,
        submit: cx.submit("send", "Sign up"),
    })
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("signup.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let body = std::env::args().nth(1).unwrap_or_default();
    let cx = FormContext::new(Submission::from_urlencoded(&body));

    let fields = match build(&cx) {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let mut form = Form::new(&cx, fields);
    form.set_name("signup").set_action("/signup");
    if let Err(e) = form.add_validation("name", "min", 2) {
        eprintln!("Error: {}", e);
        return;
    }

    if form.is_posted() {
        match form.validate() {
            Ok(true) => println!("<!-- submission accepted -->"),
            Ok(false) => println!("<!-- submission rejected -->"),
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        }
    }

    match form.render() {
        Ok(html) => print!("{}", html),
        Err(e) => eprintln!("Error: {}", e),
    }
}
