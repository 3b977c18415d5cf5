use std::io::Write as _;
use std::sync::Arc;

use oncoscope_client::backend::SchemaSource;
use oncoscope_client::http::HttpBackend;
use oncoscope_session::SessionController;
use oncoscope_session::error::ErrorKind;
use oncoscope_session::state::{SendOutcome, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::{Command, HELP};
use crate::render;

/// Interactive session on stdin/stdout.
///
/// The schema loads in the background. `submit` and `say` run as spawned
/// tasks so the prompt stays live and `clear` can supersede them.
pub async fn run(
    controller: Arc<SessionController>,
    backend: HttpBackend,
    source: Box<dyn SchemaSource>,
) -> eyre::Result<()> {
    println!(
        "oncoscope session {} on {} (type `help`)",
        controller.session_id(),
        backend.base_url()
    );

    tokio::spawn({
        let controller = controller.clone();
        async move {
            match controller.load_schema(source.as_ref()).await {
                Ok(fields) => println!("schema loaded: {fields} fields"),
                Err(e) => println!("{}", render::error(&e)),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        debug!(?command, "command");

        match command {
            Command::Empty => {}
            Command::Fields => println!("{}", render::fields(&controller.form().await)),
            Command::Set { key, value } => {
                if let Err(e) = controller.set_text(&key, &value).await {
                    println!("{}", render::error(&e));
                }
            }
            Command::Unset { key } => {
                if let Err(e) = controller.set_value(&key, None).await {
                    println!("{}", render::error(&e));
                }
            }
            Command::Example => {
                let filled = controller.fill_example().await;
                println!("filled {filled} fields with example values");
            }
            Command::Submit => spawn_submit(controller.clone()),
            Command::Say(text) => spawn_say(controller.clone(), text),
            Command::History => {
                println!("{}", render::history(&controller.snapshot().await.messages))
            }
            Command::Status => println!("{}", render::status(&controller.snapshot().await)),
            Command::Clear => {
                controller.clear().await;
                println!("session cleared");
            }
            Command::Reset => {
                controller.reset_form().await;
                println!("form values cleared");
            }
            Command::Health => match backend.health().await {
                Ok(health) => println!("backend: {}", health.status),
                Err(e) => println!("backend unreachable: {e}"),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

fn spawn_submit(controller: Arc<SessionController>) {
    tokio::spawn(async move {
        match controller.submit().await {
            Ok(SubmitOutcome::ChatReady) => {
                let snapshot = controller.snapshot().await;
                if let Some(prediction) = &snapshot.prediction {
                    println!("{}", render::prediction(prediction));
                }
                if let Some(greeting) = snapshot.messages.last() {
                    println!("{}", render::message(greeting));
                }
            }
            Ok(SubmitOutcome::Ignored) => {
                let snapshot = controller.snapshot().await;
                if snapshot.busy {
                    println!("still waiting on the backend");
                } else if !snapshot.schema_loaded {
                    println!("schema not loaded yet");
                } else {
                    let missing = controller.missing_fields().await;
                    println!("form incomplete; missing: {}", missing.join(", "));
                }
            }
            Ok(SubmitOutcome::Superseded) => {}
            Err(e) => {
                println!("{}", render::error(&e));
                if e.kind() == ErrorKind::Chat {
                    if let Some(prediction) = controller.snapshot().await.prediction {
                        println!("{}", render::prediction(&prediction));
                    }
                }
            }
        }
    });
}

fn spawn_say(controller: Arc<SessionController>, text: String) {
    tokio::spawn(async move {
        match controller.send_message(&text).await {
            Ok(SendOutcome::Replied) => {
                if let Some(reply) = controller.snapshot().await.messages.last() {
                    println!("{}", render::message(reply));
                }
            }
            Ok(SendOutcome::Ignored) => println!("nothing sent"),
            Ok(SendOutcome::Superseded) => {}
            Err(e) => println!("{}", render::error(&e)),
        }
    });
}
