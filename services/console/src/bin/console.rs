//! services/console/src/bin/console.rs

use assistant_core::{
    ClassificationHistoryController, ConversationController, RejectReason, SendOutcome, Session,
    SessionController,
};
use console_lib::{
    adapters::{build_client, HttpAssistantGateway, HttpClassifierGateway},
    config::Config,
    error::ConsoleError,
    render,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  /classify  classify an email and generate a reply
  /history   show classification results, newest first
  /end       end the chat session (a summary is generated)
  /help      show this help
  /quit      leave the console
Anything else is sent to the assistant.";

/// One line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    End,
    Classify,
    History,
    Blank,
    Chat(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/quit" => Command::Quit,
            "/help" => Command::Help,
            "/end" => Command::End,
            "/classify" => Command::Classify,
            "/history" => Command::History,
            "" => Command::Blank,
            text => Command::Chat(text),
        }
    }
}

struct Console {
    sessions: SessionController,
    conversation: Arc<ConversationController>,
    history: ClassificationHistoryController,
    input: Lines<BufReader<Stdin>>,
}

impl Console {
    async fn prompt(&mut self, label: &str) -> Result<Option<String>, ConsoleError> {
        print!("{}", label);
        std::io::stdout().flush()?;
        Ok(self.input.next_line().await?)
    }

    async fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            let Some(session) = self.sessions.current().await else {
                if !self.sign_in().await? {
                    return Ok(());
                }
                continue;
            };

            let Some(line) = self.prompt("> ").await? else {
                return Ok(());
            };
            match Command::parse(&line) {
                Command::Quit => return Ok(()),
                Command::Help => println!("{}", HELP),
                Command::End => self.end(&session).await,
                Command::Classify => {
                    if !self.classify().await? {
                        return Ok(());
                    }
                }
                Command::History => {
                    println!("{}", render::history(&self.history.records().await))
                }
                Command::Blank => {}
                Command::Chat(text) => self.send(text).await,
            }
        }
    }

    /// Returns `false` once the operator asks to leave.
    async fn sign_in(&mut self) -> Result<bool, ConsoleError> {
        println!("\nPlease provide your information to start a chat.");
        let Some(name) = self.prompt("Name (or /classify, /history, /quit): ").await? else {
            return Ok(false);
        };
        match name.trim() {
            "/quit" => return Ok(false),
            "/classify" => return self.classify().await,
            "/history" => {
                println!("{}", render::history(&self.history.records().await));
                return Ok(true);
            }
            _ => {}
        }
        let Some(email) = self.prompt("Email: ").await? else {
            return Ok(false);
        };
        let Some(phone) = self.prompt("Phone (optional): ").await? else {
            return Ok(false);
        };

        println!("Starting...");
        match self
            .sessions
            .create_session(&name, &email, Some(phone.as_str()))
            .await
        {
            Ok(session) => {
                println!("\n{}", render::session_header(&session));
                for message in self.conversation.messages().await {
                    println!("{}\n", render::message(&message));
                }
            }
            Err(e) => println!("{}", e),
        }
        Ok(true)
    }

    async fn send(&self, text: &str) {
        if self.conversation.is_pending().await {
            println!("Still waiting for the previous reply.");
            return;
        }
        println!("{}", render::THINKING);
        match self.conversation.send_message(text).await {
            SendOutcome::Replied(reply) | SendOutcome::Failed(reply) => {
                println!("{}\n", render::message(&reply))
            }
            SendOutcome::Rejected(RejectReason::EmptyMessage) => {}
            SendOutcome::Rejected(RejectReason::ExchangePending) => {
                println!("Still waiting for the previous reply.")
            }
            SendOutcome::Rejected(RejectReason::NoActiveConversation) | SendOutcome::Discarded => {
                println!("The session is no longer active.")
            }
        }
    }

    async fn end(&self, session: &Session) {
        match self.sessions.end_session(session.session_id()).await {
            Ok(()) => println!("Session ended! Summary generated for future reference."),
            Err(e) => println!("{}", e),
        }
    }

    /// Returns `false` if input ended while filling in the form.
    async fn classify(&mut self) -> Result<bool, ConsoleError> {
        let Some(subject) = self.prompt("Subject: ").await? else {
            return Ok(false);
        };
        let Some(text) = self.prompt("Email text: ").await? else {
            return Ok(false);
        };
        let Some(from) = self.prompt("From email (optional): ").await? else {
            return Ok(false);
        };

        println!("⏳ Processing...");
        match self
            .history
            .classify(&subject, &text, Some(from.as_str()))
            .await
        {
            Ok(record) => println!("{}", render::record(&record)),
            Err(e) => println!("⚠️ {}", e),
        }
        Ok(true)
    }
}

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(
        assistant = %config.assistant_api_url,
        classifier = %config.classifier_api_url,
        "Configuration loaded."
    );

    // --- 2. Initialize Gateway Adapters ---
    let client = build_client(config.request_timeout)?;
    let assistant = Arc::new(HttpAssistantGateway::new(
        client.clone(),
        config.assistant_api_url.clone(),
    ));
    let classifier = Arc::new(HttpClassifierGateway::new(
        client,
        config.classifier_api_url.clone(),
    ));

    // --- 3. Build the Controllers ---
    let conversation = Arc::new(ConversationController::new(assistant.clone()));
    let sessions = SessionController::new(assistant, conversation.clone());
    let history = ClassificationHistoryController::new(classifier);

    // --- 4. Run the Console ---
    println!("LifeGuard-Pro Assistant Console\n{}", HELP);
    let mut console = Console {
        sessions,
        conversation,
        history,
        input: BufReader::new(tokio::io::stdin()).lines(),
    };
    console.run().await?;

    info!("Console closed.");
    Ok(())
}
