//! Interactive terminal prompts for the login loop.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use opgaver_core::auth::{CredentialSource, Credentials};
use opgaver_core::models::School;

/// More matches than this and the user is asked to narrow the search
const MAX_LISTED_SCHOOLS: usize = 15;

/// Reads credentials from stdin, with the password read without echo.
pub struct TerminalPrompt {
    default_username: Option<String>,
    default_school_id: Option<String>,
}

impl TerminalPrompt {
    pub fn new(default_username: Option<String>, default_school_id: Option<String>) -> Self {
        Self {
            default_username,
            default_school_id,
        }
    }
}

impl CredentialSource for TerminalPrompt {
    fn credentials(&mut self, schools: &[School]) -> Result<Credentials> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        let username = ask_username(&mut input, &mut output, self.default_username.as_deref())?;
        let password = rpassword::prompt_password("What is your Lectio password? ")
            .context("Failed to read password")?;
        let school = select_school(&mut input, &mut output, schools, self.default_school_id.as_deref())?;

        // Later attempts default to what was typed this time
        self.default_username = Some(username.clone());
        self.default_school_id = Some(school.id.clone());

        Ok(Credentials::new(username, password, school.id.clone()))
    }

    fn retry(&mut self, error: &anyhow::Error) -> Result<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        writeln!(output, "\n{:#}\n", error)?;
        ask_yes_no(&mut input, &mut output, "Do you want to try again?", true)
    }
}

/// Read one trimmed line. EOF means there is no one to ask.
fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Err(anyhow!("Error: Non-interactive environment, no input to read.")),
        Ok(_) => Ok(line.trim().to_string()),
        Err(e) => Err(anyhow!("Failed to read input: {}", e)),
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{} ", question)?;
    output.flush().context("Failed to flush stdout")?;
    read_line(input)
}

pub fn ask_username<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: Option<&str>,
) -> Result<String> {
    let question = match default {
        Some(name) => format!("What is your Lectio username? [{}]", name),
        None => "What is your Lectio username?".to_string(),
    };

    loop {
        let answer = ask(input, output, &question)?;
        match (answer.is_empty(), default) {
            (false, _) => return Ok(answer),
            (true, Some(name)) => return Ok(name.to_string()),
            (true, None) => writeln!(output, "A username is required.")?,
        }
    }
}

/// Ask a yes/no question. An empty answer picks `default`.
pub fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let answer = ask(input, output, &format!("{} {}", question, hint))?.to_lowercase();
        match answer.as_str() {
            "" => return Ok(default),
            "y" | "yes" | "j" | "ja" => return Ok(true),
            "n" | "no" | "nej" => return Ok(false),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}

/// Schools whose id equals `query`, or else whose name contains it
pub fn matching_schools<'a>(schools: &'a [School], query: &str) -> Vec<&'a School> {
    let query = query.trim();
    if let Some(exact) = schools.iter().find(|s| s.id == query) {
        return vec![exact];
    }

    let needle = query.to_lowercase();
    schools
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect()
}

/// Let the user search the school list and pick one entry.
pub fn select_school<'a, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    schools: &'a [School],
    default_id: Option<&str>,
) -> Result<&'a School> {
    if schools.is_empty() {
        return Err(anyhow!("The school list is empty"));
    }

    let default = default_id.and_then(|id| schools.iter().find(|s| s.id == id));
    let question = match default {
        Some(school) => format!("What school do you attend? [{}]", school),
        None => "What school do you attend? (part of the name or the id)".to_string(),
    };

    loop {
        let query = ask(input, output, &question)?;
        if query.is_empty() {
            if let Some(school) = default {
                return Ok(school);
            }
            continue;
        }

        let matches = matching_schools(schools, &query);
        match matches.len() {
            0 => writeln!(output, "No school matches \"{}\".", query)?,
            1 => return Ok(matches[0]),
            n if n > MAX_LISTED_SCHOOLS => {
                writeln!(output, "{} schools match \"{}\", please be more specific.", n, query)?
            }
            _ => {
                if let Some(school) = choose_from(input, output, &matches)? {
                    return Ok(school);
                }
            }
        }
    }
}

/// Numbered pick among several matches. `None` means search again.
fn choose_from<'a, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    matches: &[&'a School],
) -> Result<Option<&'a School>> {
    for (i, school) in matches.iter().enumerate() {
        writeln!(output, "  {:>2}) {}", i + 1, school)?;
    }

    let answer = ask(input, output, "Pick a number (empty to search again):")?;
    if answer.is_empty() {
        return Ok(None);
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=matches.len()).contains(&n) => Ok(Some(matches[n - 1])),
        _ => {
            writeln!(output, "\"{}\" is not one of the listed numbers.", answer)?;
            Ok(None)
        }
    }
}
