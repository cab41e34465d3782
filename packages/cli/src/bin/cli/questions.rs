use anyhow::Result;
use auditflow_core::{follow_up_questions, Language};
use clap::Args;
use colored::*;

#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Language of the questions (en, zh)
    #[arg(long, default_value = "en")]
    pub lang: Language,
}

pub fn handle_questions_command(args: QuestionsArgs) -> Result<()> {
    println!(
        "{} ({})",
        "❓ Follow-up questions".blue().bold(),
        args.lang.label()
    );
    for (i, question) in follow_up_questions(args.lang).iter().enumerate() {
        println!("{}. {}", format!("{:>3}", i + 1).cyan(), question);
    }
    Ok(())
}
