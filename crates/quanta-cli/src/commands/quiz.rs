//! Quiz command implementation.

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use quanta_client::{QuizLevel, QuizSession};

use super::common::{ConnectionArgs, create_client, spinner};

/// Execute the quiz command.
pub async fn execute(args: &ConnectionArgs, level: QuizLevel) -> Result<()> {
    let (client, _) = create_client(args)?;

    let progress = spinner(format!("Loading {level} questions..."));
    let questions = client.quiz(level).await;
    progress.finish_and_clear();
    let questions = questions?;

    if questions.is_empty() {
        println!("No questions available for level {}", style(level).yellow());
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    let mut session = QuizSession::new(questions, &mut rng);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if !run_once(&mut session, &mut input).await? {
            return Ok(());
        }

        println!(
            "\n{} You scored {}/{}",
            style("✓").green().bold(),
            style(session.score()).yellow(),
            session.len()
        );
        println!("{}", session.verdict());

        match prompt(&mut input, "\nPlay again? [y/N] ").await? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => session.restart(&mut rng),
            _ => return Ok(()),
        }
    }
}

/// Ask every question once. Returns `false` if input ended early.
async fn run_once(session: &mut QuizSession, input: &mut Lines<BufReader<Stdin>>) -> Result<bool> {
    let total = session.len();

    while let Some(question) = session.current().cloned() {
        println!(
            "\n{} {}",
            style(format!("Question {}/{}:", session.position() + 1, total)).cyan().bold(),
            question.question
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let feedback = loop {
            let Some(line) = prompt(input, "Your answer: ").await? else {
                return Ok(false);
            };
            let choice = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
            match choice.and_then(|i| session.select_answer(i)) {
                Some(feedback) => break feedback,
                None => println!("Enter a number between 1 and {}", question.options.len()),
            }
        };

        if feedback.correct {
            println!("{}", style("Correct!").green().bold());
        } else {
            println!(
                "{} The answer was: {}",
                style("Incorrect.").red().bold(),
                question
                    .options
                    .get(feedback.correct_answer)
                    .map_or("(not listed)", String::as_str)
            );
        }
        session.next();
    }
    Ok(true)
}

async fn prompt(input: &mut Lines<BufReader<Stdin>>, text: &str) -> Result<Option<String>> {
    use std::io::Write;

    print!("{text}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}
