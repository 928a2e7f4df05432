use console::{style, Term};
use inquire::Confirm;

/// Ask before pushing. Cancelling or a non-interactive terminal counts as no.
pub fn confirm_push(remote: &str, branch: &str) -> bool {
    let target = if branch.is_empty() {
        remote.to_string()
    } else {
        format!("{remote}/{branch}")
    };

    match Confirm::new(&format!("Push to {target}?"))
        .with_default(true)
        .prompt()
    {
        Ok(answer) => answer,
        Err(err) => {
            eprintln!(
                "{} Push confirmation cancelled: {}",
                style("⚠").yellow().bold(),
                style(err).yellow()
            );
            false
        }
    }
}

/// Block until a key is pressed; returns immediately when stdout is not a
/// terminal
pub fn wait_for_keypress() {
    let term = Term::stdout();
    if !term.is_term() {
        return;
    }

    println!("{}", style("Press any key to continue...").dim());
    if let Err(err) = term.read_key() {
        tracing::debug!("Could not read key: {err}");
    }
}
