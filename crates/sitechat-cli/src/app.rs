use crate::commands::{handle_command, CommandResult};
use crate::render;
use anyhow::{Context, Result};
use sitechat_core::{ChatSession, LeadCapture, Settings};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Load context documents and the completion client. Any failure here is
/// fatal; nothing is served without both.
fn start_session(settings: &Settings) -> Result<ChatSession> {
    let assembler = settings
        .build_prompt_assembler()
        .context("could not load context documents")?;
    let llm = settings.build_llm_client()?;
    Ok(ChatSession::new(llm, assembler))
}

pub async fn run_single_prompt(settings: &Settings, prompt: &str) -> Result<()> {
    let mut session = start_session(settings)?;
    let reply = session
        .respond(prompt)
        .await
        .map_err(|e| render::failure(&e))?;
    println!("{reply}");
    Ok(())
}

// ── Interactive REPL ────────────────────────────────────────────────────

struct Repl {
    session: ChatSession,
    capture: LeadCapture,
    lines: Lines<BufReader<Stdin>>,
}

pub async fn run_repl(settings: &Settings) -> Result<()> {
    let session = start_session(settings)?;
    let capture = settings.build_lead_capture();

    let mut repl = Repl {
        session,
        capture,
        lines: BufReader::new(tokio::io::stdin()).lines(),
    };

    println!(
        "Talk to {}'s Assistant (/help for commands, Ctrl+D to exit)",
        repl.session.persona()
    );
    println!("---");
    repl.run().await
}

impl Repl {
    async fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = self.read_line("> ").await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match handle_command(line) {
                CommandResult::Quit => break,
                CommandResult::Message(text) => println!("{text}"),
                CommandResult::ShowHistory => {
                    let persona = self.session.persona();
                    println!("{}", render::history(persona, self.session.transcript()));
                }
                CommandResult::ShowStatus => self.show_status(),
                CommandResult::RequestCv => self.request_cv().await?,
                CommandResult::NotACommand => self.ask(line).await,
            }
        }
        Ok(())
    }

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        if let Err(e) = std::io::stdout().flush() {
            tracing::warn!("failed to flush stdout: {e}");
        }
        Ok(self.lines.next_line().await?)
    }

    async fn ask(&mut self, question: &str) {
        match self.session.respond(question).await {
            Ok(reply) => println!("{}", render::reply_line(self.session.persona(), &reply)),
            Err(e) => eprintln!("{}", render::error(&e)),
        }
    }

    async fn request_cv(&mut self) -> Result<()> {
        println!("Share your email to receive {}'s CV", self.session.persona());
        let name = self.read_line("Your name: ").await?.unwrap_or_default();
        let email = self.read_line("Your email: ").await?.unwrap_or_default();

        match self.session.capture_lead(&name, &email, &self.capture).await {
            Ok(report) => {
                for (step, reason) in report.failures() {
                    tracing::warn!(%step, "lead step failed: {reason}");
                }
                println!("{}", render::lead_report(self.session.persona(), &report));
            }
            Err(e) => eprintln!("{}", render::error(&e)),
        }
        Ok(())
    }

    fn show_status(&self) {
        let transcript = self.session.transcript();
        println!("Persona:  {}", self.session.persona());
        println!("Model:    {}", self.session.model());
        println!("Session:  {}", self.session.id());
        println!("Turns:    {}", transcript.len());
        println!("Tokens:   ~{}", transcript.estimate_tokens());
    }
}
