//! Command definitions
//!
//! Server commands are single-character codes on the wire. Client commands
//! are the menu names a user types, each mapping to at most one server code.

/// Commands understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerCommand {
    /// `c`: capital city of a country
    GetCity,

    /// `p`: population of a country
    GetPopulation,

    /// `a`: add a `country,city` pair
    AddCountry,

    /// `h`: liveness check
    Heartbeat,
}

impl ServerCommand {
    /// All server commands, in code order
    pub const ALL: [ServerCommand; 4] = [
        ServerCommand::GetCity,
        ServerCommand::GetPopulation,
        ServerCommand::AddCountry,
        ServerCommand::Heartbeat,
    ];

    /// Resolve a wire command token
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "c" => Some(ServerCommand::GetCity),
            "p" => Some(ServerCommand::GetPopulation),
            "a" => Some(ServerCommand::AddCountry),
            "h" => Some(ServerCommand::Heartbeat),
            _ => None,
        }
    }

    /// Wire code for this command
    pub fn code(&self) -> char {
        match self {
            ServerCommand::GetCity => 'c',
            ServerCommand::GetPopulation => 'p',
            ServerCommand::AddCountry => 'a',
            ServerCommand::Heartbeat => 'h',
        }
    }
}

/// Commands a user can enter at the client prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    Commands,
    GetCity,
    GetPopulation,
    AddNewCountry,
    Heart,
    Stop,
}

impl ClientCommand {
    /// All client commands, in menu order
    pub const ALL: [ClientCommand; 6] = [
        ClientCommand::Commands,
        ClientCommand::GetCity,
        ClientCommand::GetPopulation,
        ClientCommand::AddNewCountry,
        ClientCommand::Heart,
        ClientCommand::Stop,
    ];

    /// Parse a user-entered name, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(wanted))
    }

    /// Canonical (uppercase) name
    pub fn name(&self) -> &'static str {
        match self {
            ClientCommand::Commands => "COMMANDS",
            ClientCommand::GetCity => "GET_CITY",
            ClientCommand::GetPopulation => "GET_POPULATION",
            ClientCommand::AddNewCountry => "ADD_NEW_COUNTRY",
            ClientCommand::Heart => "HEART",
            ClientCommand::Stop => "STOP",
        }
    }

    /// Menu description
    pub fn description(&self) -> &'static str {
        match self {
            ClientCommand::Commands => "Show a list of commands",
            ClientCommand::GetCity => "Provide a country and receive its capital city",
            ClientCommand::GetPopulation => "Provide a country and receive its population",
            ClientCommand::AddNewCountry => {
                "Provide a country and its capital city to add to the server's database"
            }
            ClientCommand::Heart => "Send a heartbeat to the server to verify connection",
            ClientCommand::Stop => "Stop the program",
        }
    }

    /// Server command this maps to, if it talks to the server at all
    pub fn server_command(&self) -> Option<ServerCommand> {
        match self {
            ClientCommand::GetCity => Some(ServerCommand::GetCity),
            ClientCommand::GetPopulation => Some(ServerCommand::GetPopulation),
            ClientCommand::AddNewCountry => Some(ServerCommand::AddCountry),
            ClientCommand::Heart => Some(ServerCommand::Heartbeat),
            ClientCommand::Commands | ClientCommand::Stop => None,
        }
    }
}
