//! Password resolution for the compare command
//!
//! `--password` unlocks both files and takes precedence over the per-file
//! flags. Anything still missing is prompted for on the terminal, but only
//! when the document provider actually needs a password.

use kpcompare_core_types::Sensitive;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Passwords as given on the command line
#[derive(Debug, Default)]
pub struct PasswordArgs {
    pub shared: Option<String>,
    pub first: Option<String>,
    pub second: Option<String>,
}

/// Resolved passwords for the two documents
#[derive(Debug)]
pub struct Credentials {
    pub first: Sensitive<String>,
    pub second: Sensitive<String>,
}

/// Resolve the passwords for both files
///
/// An empty second password reuses the first one, so the common case of two
/// copies of the same database needs only one prompt.
pub fn resolve<R: BufRead, W: Write>(
    args: PasswordArgs,
    file1: &Path,
    file2: &Path,
    needs_password: bool,
    input: &mut R,
    prompt: &mut W,
) -> io::Result<Credentials> {
    let (first, second) = match args.shared {
        Some(shared) => (Some(shared.clone()), Some(shared)),
        None => (args.first, args.second),
    };

    let first = match first {
        Some(password) => password,
        None if needs_password => ask(
            input,
            prompt,
            &format!("Password for file \"{}\"", file1.display()),
        )?,
        None => String::new(),
    };

    let second = match second {
        Some(password) => password,
        None if needs_password => ask(
            input,
            prompt,
            &format!(
                "Password for file \"{}\" (empty to reuse the first)",
                file2.display()
            ),
        )?,
        None => String::new(),
    };
    let second = if second.is_empty() {
        first.clone()
    } else {
        second
    };

    Ok(Credentials {
        first: Sensitive::new(first),
        second: Sensitive::new(second),
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, prompt: &mut W, label: &str) -> io::Result<String> {
    write!(prompt, "{}: ", label)?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}
