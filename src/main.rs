//! Terminal shell and entry point.
//!
//! This module provides the thin integration layer between the Libroteca
//! library and the terminal: it reads line-oriented commands from stdin,
//! translates them into controller calls, and prints the resulting catalog
//! views and notices. All business logic lives in the library layer; the
//! shell only parses input and renders output.
//!
//! # Commands
//!
//! - `login <username> <password>`: authenticate and load the catalog
//! - `logout`: end the session and clear local state
//! - `list`: re-fetch the catalog from the backend
//! - `search [query]`: filter the cached catalog (empty query clears)
//! - `add`: prompt for title/author and create a record (admin)
//! - `edit <id>`: prompt with current values and update a record (admin)
//! - `delete <id>`: delete a record after explicit confirmation (admin)
//! - `cancel`: abandon a pending edit or delete
//! - `help`, `quit`
//!
//! # Lifecycle
//!
//! 1. Resolve configuration (defaults, `config.toml`, environment)
//! 2. Initialize tracing
//! 3. Build the controller context and restore any persisted session
//! 4. Run the command loop until EOF or `quit`

use std::io::{self, Write};
use std::time::Instant;

use libroteca::{initialize, ui, Config, Controller, FormMode, HttpCatalog, JsonVault};

type AppController = Controller<HttpCatalog, JsonVault>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("libroteca: {e}");
            std::process::exit(2);
        }
    };
    libroteca::observability::init_tracing(&config);
    tracing::debug!(api_url = %config.api_url, data_dir = ?config.data_dir, "starting");

    let mut controller = initialize(&config);
    controller.bootstrap().await;

    println!("libroteca, catalog at {}", config.api_url);
    match &controller.state.session {
        Some(session) => {
            println!("Signed in as {}.", session.role);
            print_catalog(&controller);
        }
        None => println!("Not signed in. Use: login <username> <password>"),
    }
    println!("Type 'help' for commands.");

    run(&mut controller).await;
}

/// The command loop. Returns on EOF or `quit`.
async fn run(controller: &mut AppController) {
    loop {
        controller.state.prune_notice(Instant::now());

        let Some(line) = read_line("> ") else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "login" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(username), Some(password)) => {
                        if controller.submit_login(username, password).await.is_ok() {
                            print_catalog(controller);
                        }
                    }
                    _ => println!("usage: login <username> <password>"),
                }
            }
            "logout" => {
                let _ = controller.logout();
            }
            "list" => {
                if controller.refresh().await.is_ok() {
                    print_catalog(controller);
                }
            }
            "search" => {
                controller.set_search(rest);
                print_catalog(controller);
            }
            "add" => {
                controller.cancel_edit();
                if fill_draft(controller) && controller.submit_form().await.is_ok() {
                    print_catalog(controller);
                }
            }
            "edit" => match rest.parse() {
                Ok(id) => {
                    if controller.request_edit(id).is_ok() {
                        if fill_draft(controller) {
                            if controller.submit_form().await.is_ok() {
                                print_catalog(controller);
                            }
                        } else {
                            // EOF mid-prompt abandons the edit.
                            controller.cancel_edit();
                        }
                    }
                }
                Err(_) => println!("usage: edit <id>"),
            },
            "delete" => match rest.parse() {
                Ok(id) => {
                    if let Ok(title) = controller.request_delete(id) {
                        let answer = read_line(&format!("Delete \"{title}\"? [y/N] "));
                        if matches!(answer.as_deref().map(str::trim), Some("y" | "Y" | "yes")) {
                            if controller.confirm_delete().await.is_ok() {
                                print_catalog(controller);
                            }
                        } else {
                            controller.cancel_delete();
                            println!("Not deleted.");
                        }
                    }
                }
                Err(_) => println!("usage: delete <id>"),
            },
            "cancel" => {
                controller.cancel_edit();
                controller.cancel_delete();
            }
            _ => println!("Unknown command '{command}'. Type 'help' for commands."),
        }

        if let Some(notice) = controller.state.current_notice(Instant::now()) {
            println!("{}", ui::render_notice(notice));
        }
    }
}

/// Prompts for title and author, filling the controller's draft.
///
/// In edit-mode an empty answer keeps the current value. Returns `false` on
/// EOF, which the caller treats as a cancel.
fn fill_draft(controller: &mut AppController) -> bool {
    let keep_current = matches!(controller.state.form_mode(), FormMode::Edit(_));

    let title_prompt = if keep_current {
        format!("Title [{}]: ", controller.state.draft.title)
    } else {
        "Title: ".to_string()
    };
    let Some(title) = read_line(&title_prompt) else {
        return false;
    };
    if !(keep_current && title.trim().is_empty()) {
        controller.state.draft.title = title.trim().to_string();
    }

    let author_prompt = if keep_current {
        format!("Author [{}]: ", controller.state.draft.author)
    } else {
        "Author: ".to_string()
    };
    let Some(author) = read_line(&author_prompt) else {
        return false;
    };
    if !(keep_current && author.trim().is_empty()) {
        controller.state.draft.author = author.trim().to_string();
    }

    true
}

/// Prints the filtered catalog with its count line.
fn print_catalog(controller: &AppController) {
    let visible = controller.visible_books();
    println!(
        "{}",
        ui::render_catalog(
            &visible,
            controller.collection.books().len(),
            &controller.state.search_query,
        )
    );
}

fn print_help() {
    println!("Commands:");
    println!("  login <username> <password>   sign in and load the catalog");
    println!("  logout                        sign out and clear local state");
    println!("  list                          re-fetch the catalog");
    println!("  search [query]                filter by title or author (empty clears)");
    println!("  add                           add a book (admin only)");
    println!("  edit <id>                     edit a book (admin only)");
    println!("  delete <id>                   delete a book (admin only)");
    println!("  cancel                        abandon a pending edit or delete");
    println!("  quit                          exit");
}

/// Prints a prompt and reads one line from stdin; `None` on EOF.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
