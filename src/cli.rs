use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::session::PayoutMethod;

/// creatorbook - book sessions with independent creators
#[derive(Parser)]
#[command(name = "creatorbook")]
#[command(about = "Browse creator services and book sessions from the terminal")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Marketplace data file (overrides the configuration)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Session file (overrides the configuration)
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    /// Simulated payment latency in milliseconds (overrides the configuration)
    #[arg(long, global = true)]
    pub payment_delay_ms: Option<u64>,

    /// Make every payment fail
    #[arg(long, global = true)]
    pub fail_payments: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive TUI (default)
    Tui,
    /// List the services in the catalog
    Services {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Register as a creator
        #[arg(long)]
        creator: bool,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the dashboard summary
    Dashboard {
        #[arg(long)]
        json: bool,
    },
    /// Change the display name of the signed-in account
    Profile {
        #[arg(short, long)]
        name: String,
    },
    /// Change the account password
    Password {
        #[arg(long = "new")]
        new_password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Set where creator earnings are paid out
    Payout {
        /// bank or paypal
        #[arg(short, long)]
        method: PayoutMethod,
        /// Full name on the bank account
        #[arg(long, default_value = "")]
        holder: String,
        /// Bank account number, or the PayPal email
        #[arg(short, long)]
        account: String,
    },
    /// Show a creator's profile and services
    Creator {
        /// Creator username, e.g. alexsmith
        username: String,
        #[arg(long)]
        json: bool,
    },
    /// Book a service without the TUI
    Book {
        /// Service id, as listed by `services`
        service_id: String,
        /// Date in YYYY-MM-DD form
        #[arg(short, long)]
        date: NaiveDate,
        /// Time in HH:MM form
        #[arg(short, long)]
        time: String,
        /// Confirm you are at least 18 years old
        #[arg(long)]
        confirm_age: bool,
        /// Print the confirmation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a marketplace data file
    Validate {
        /// Path to the data file to validate
        data_file: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Whether this invocation launches the TUI.
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to TUI mode)
        let cli = Cli::try_parse_from(["creatorbook"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_tui());
    }

    #[test]
    fn test_cli_book_command() {
        let cli = Cli::try_parse_from([
            "creatorbook",
            "book",
            "1",
            "--date",
            "2023-06-20",
            "--time",
            "12:00",
            "--confirm-age",
        ])
        .unwrap();
        assert!(!cli.is_tui());
        match cli.command {
            Some(Commands::Book {
                service_id,
                date,
                time,
                confirm_age,
                json,
            }) => {
                assert_eq!(service_id, "1");
                assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 20).unwrap());
                assert_eq!(time, "12:00");
                assert!(confirm_age);
                assert!(!json);
            }
            _ => panic!("Expected Book command"),
        }
    }

    #[test]
    fn test_cli_book_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "creatorbook",
            "book",
            "1",
            "--date",
            "June 20",
            "--time",
            "12:00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_validate_command() {
        let cli = Cli::try_parse_from(["creatorbook", "validate", "/path/to/data.json"]).unwrap();
        match cli.command {
            Some(Commands::Validate { data_file }) => {
                assert_eq!(data_file.to_str().unwrap(), "/path/to/data.json");
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_password_command() {
        let cli = Cli::try_parse_from([
            "creatorbook",
            "password",
            "--new",
            "hunter22",
            "--confirm",
            "hunter22",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Password {
                new_password,
                confirm,
            }) => {
                assert_eq!(new_password, "hunter22");
                assert_eq!(confirm, "hunter22");
            }
            _ => panic!("Expected Password command"),
        }
    }

    #[test]
    fn test_cli_payout_method_parsing() {
        let cli = Cli::try_parse_from([
            "creatorbook",
            "payout",
            "--method",
            "paypal",
            "--account",
            "sam@example.com",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Payout {
                method,
                holder,
                account,
            }) => {
                assert_eq!(method, PayoutMethod::Paypal);
                assert!(holder.is_empty());
                assert_eq!(account, "sam@example.com");
            }
            _ => panic!("Expected Payout command"),
        }

        let result = Cli::try_parse_from([
            "creatorbook",
            "payout",
            "--method",
            "wire",
            "--account",
            "1234",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_creator_command() {
        let cli = Cli::try_parse_from(["creatorbook", "creator", "alexsmith", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Creator { username, json }) => {
                assert_eq!(username, "alexsmith");
                assert!(json);
            }
            _ => panic!("Expected Creator command"),
        }
    }

    #[test]
    fn test_cli_global_overrides() {
        let cli = Cli::try_parse_from([
            "creatorbook",
            "services",
            "--payment-delay-ms",
            "0",
            "--fail-payments",
        ])
        .unwrap();
        assert_eq!(cli.payment_delay_ms, Some(0));
        assert!(cli.fail_payments);
    }

    #[test]
    fn test_cli_signup_creator() {
        let cli = Cli::try_parse_from([
            "creatorbook",
            "signup",
            "--name",
            "Sam",
            "--email",
            "sam@example.com",
            "--password",
            "secret",
            "--creator",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Signup { creator: true, .. })));
    }
}
