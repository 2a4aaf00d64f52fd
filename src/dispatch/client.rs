//! Client-side command table
//!
//! Turns a menu command into the action the client loop should take,
//! prompting for whatever arguments the request needs.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::protocol::{ClientCommand, Packet};

/// What the client loop does for one menu command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Print the command menu
    ShowMenu,

    /// Send a request and print the reply
    Send(Packet),

    /// Leave the loop without touching the network
    Stop,
}

/// Line-oriented prompt over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `text` (no newline) and read one line
    ///
    /// Returns `None` once input is exhausted.
    pub fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Print one line
    pub fn print(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// The command menu, one line per client command
pub fn menu() -> String {
    let mut text = String::from("\n============\n");
    for command in ClientCommand::ALL {
        text.push_str(command.name());
        text.push_str(": ");
        text.push_str(command.description());
        text.push('\n');
    }
    text.push_str("============\n");
    text
}

/// Resolve a menu command into an action, prompting for its arguments
///
/// Running out of input mid-prompt resolves to [`ClientAction::Stop`].
pub fn resolve<R: BufRead, W: Write>(
    command: ClientCommand,
    console: &mut Console<R, W>,
) -> Result<ClientAction> {
    let code = match command.server_command() {
        Some(server_command) => server_command.code(),
        None if command == ClientCommand::Commands => return Ok(ClientAction::ShowMenu),
        None => return Ok(ClientAction::Stop),
    };

    let payload = match command {
        ClientCommand::GetCity | ClientCommand::GetPopulation => {
            match console.prompt(" -> Enter a country: ")? {
                Some(country) => country,
                None => return Ok(ClientAction::Stop),
            }
        }
        ClientCommand::AddNewCountry => {
            let Some(country) = console.prompt(" -> Enter a country: ")? else {
                return Ok(ClientAction::Stop);
            };
            let Some(city) = console.prompt(&format!(" -> Enter {}'s capital city: ", country))?
            else {
                return Ok(ClientAction::Stop);
            };
            format!("{},{}", country, city)
        }
        _ => String::new(),
    };

    Ok(ClientAction::Send(Packet::request(code, payload)))
}
