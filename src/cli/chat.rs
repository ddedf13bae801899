use std::path::{Path, PathBuf};

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::api::ApiClient;
use crate::chat::render::format_message;
use crate::chat::{ChatView, ErrorBanner, TranscriptFollower, UnansweredTurnPolicy};
use crate::document;

pub async fn run(
    client: ApiClient,
    policy: UnansweredTurnPolicy,
    file: Option<PathBuf>,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut view = ChatView::new(client, policy);
    let mut follower = TranscriptFollower::default();
    let mut banner = ErrorBanner::default();

    println!("Enter the path of a .pdf or .docx document to chat about it.");
    println!("In a chat, /end closes the session and /quit exits.");

    if let Some(path) = file {
        open(&mut view, &path).await;
        render(&view, &mut follower, &mut banner);
    }

    loop {
        let prompt = if view.model().session.is_active() {
            ">>> "
        } else {
            "document> "
        };
        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "/quit" => break,
                    "/end" => {
                        if view.model().session.is_active() {
                            view.end().await;
                        } else {
                            println!("No chat session is open.");
                        }
                    }
                    text if view.model().session.is_active() => view.send(text).await,
                    path => open(&mut view, Path::new(path)).await,
                }
                render(&view, &mut follower, &mut banner);
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    // Don't leave the session open on the service
    if view.model().session.is_active() {
        view.end().await;
        render(&view, &mut follower, &mut banner);
    }

    Ok(())
}

async fn open(view: &mut ChatView, path: &Path) {
    match document::pick(path).await {
        Ok(file) => {
            println!("Uploading {}...", file.name());
            view.select_file(file).await;
        }
        Err(e) => println!("{:#}", e),
    }
}

fn render(view: &ChatView, follower: &mut TranscriptFollower, banner: &mut ErrorBanner) {
    let model = view.model();
    for message in follower.unseen(model.session.transcript()) {
        println!("{}", format_message(message));
    }
    if let Some(error) = banner.unseen(model) {
        println!("! {}", error);
    }
}
