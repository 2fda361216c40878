//! Interactive user registration console.
//!
//! Demonstrates:
//! - Registering users through `UserRegistryApi`, with input re-prompting on invalid data
//! - Welcome-email and audit observers fired by a `UserDirectory`
//! - The process-wide `SingletonRegistry` as a drop-in alternative (`singleton` argument)
//!
//! Run with: `cargo run --example registration_console [singleton]`
//! Set `RUST_LOG=debug` to see registry internals.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use user_registry::{
    is_valid_email, is_valid_username, AuditLogService, EmailNotificationService,
    NotificationBus, SingletonRegistry, UserDirectory, UserRegistryApi,
};

/// Prints `label` and reads one trimmed line; `None` on end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks until both fields are valid; `None` on end of input.
fn read_user(input: &mut impl BufRead) -> io::Result<Option<(String, String)>> {
    loop {
        let Some(username) = prompt(input, "Username: ")? else {
            return Ok(None);
        };
        if !is_valid_username(&username) {
            println!("Invalid username: it must be non-empty and alphanumeric.");
            continue;
        }

        let Some(email) = prompt(input, "Email: ")? else {
            return Ok(None);
        };
        if !is_valid_email(&email) {
            println!("Invalid email: use the form name@domain.tld.");
            continue;
        }

        return Ok(Some((username, email)));
    }
}

fn run(registry: &dyn UserRegistryApi, input: &mut impl BufRead) -> io::Result<()> {
    loop {
        println!("\n1. Register user");
        println!("2. List users");
        println!("3. Look up email");
        println!("4. Exit");

        let Some(choice) = prompt(input, "Choose an option: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some((username, email)) = read_user(input)? else {
                    break;
                };
                match registry.register(&username, &email) {
                    Ok(()) => println!("User '{username}' registered."),
                    Err(err) => println!("{err}"),
                }
            }
            "2" => {
                let users = registry.list_all();
                if users.is_empty() {
                    println!("No users registered.");
                } else {
                    println!("Registered users:");
                    for user in users {
                        println!("- {}: {}", user.username, user.email);
                    }
                }
            }
            "3" => {
                let Some(username) = prompt(input, "Username: ")? else {
                    break;
                };
                match registry.get_email(&username) {
                    Some(email) => println!("Email of {username}: {email}"),
                    None => println!("User '{username}' not found."),
                }
            }
            "4" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid option. Try again."),
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let use_singleton = std::env::args().nth(1).as_deref() == Some("singleton");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if use_singleton {
        println!("=== user-registry: shared singleton registry ===");
        run(SingletonRegistry::get_instance(), &mut input)
    } else {
        println!("=== user-registry: directory with notifications ===");

        let bus = Arc::new(NotificationBus::new());
        bus.subscribe(Arc::new(EmailNotificationService::new()));
        bus.subscribe(Arc::new(AuditLogService::new()));

        let directory = UserDirectory::with_bus(bus);
        run(&directory, &mut input)
    }
}
