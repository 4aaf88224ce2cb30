use colored::Colorize;
use record_query::RecordQuery;
use std::io::Read;
use std::process::exit;

/// Runs a query body through the same validation the library applies before
/// a body goes out, and says what it found.
pub fn check(body: String) {
    let body = if body == "-" { read_stdin() } else { body };

    match RecordQuery::from_request_body(&body) {
        Ok(query) => {
            println!("{intro} {query}", intro = "ok:".bold().green());
        }
        Err(error) => {
            eprintln!("{intro} {error}", intro = "invalid:".bold().red());
            exit(1);
        }
    }
}

fn read_stdin() -> String {
    let mut buffer = String::new();

    std::io::stdin()
        .read_to_string(&mut buffer)
        .expect("Cannot read the query body from stdin.");

    buffer
}
