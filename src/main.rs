use std::io::{self, Write};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use tally::banner::{BannerInfo, print_banner, print_session_summary};
use tally::broker::sns::SnsPublisher;
use tally::broker::sqs::{ReceiveConfig, SqsReceiver};
use tally::input::{self, Input};
use tally::session::{Session, SessionConfig};

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Numbers out, totals back, by way of a topic and a queue."
)]
struct Cli {
    /// URL of the queue subscribed to the topic (receive source)
    #[arg(short, long)]
    queue_url: String,

    /// Name of the topic (shown in the banner)
    #[arg(short, long)]
    topic: String,

    /// ARN of the topic (publish destination)
    #[arg(short = 'a', long)]
    topic_arn: String,

    /// Long-poll wait in seconds for each receive call
    #[arg(long, default_value_t = 20)]
    wait_time_seconds: i32,

    /// Maximum messages per receive batch (only the first is consumed)
    #[arg(long, default_value_t = 1)]
    max_messages: i32,
}

/// Initialize the logger. Operator-facing output stays on stdout;
/// this only covers diagnostics.
fn init_logger() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "warn");
    env_logger::Builder::from_env(env).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger();

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let publisher = Box::new(SnsPublisher::new(aws_sdk_sns::Client::new(&aws_config)));
    let receiver = Box::new(SqsReceiver::new(
        aws_sdk_sqs::Client::new(&aws_config),
        ReceiveConfig {
            wait_time_seconds: cli.wait_time_seconds,
            max_messages: cli.max_messages,
            ..ReceiveConfig::default()
        },
    ));

    let mut session = Session::new(
        publisher,
        receiver,
        SessionConfig {
            destination: cli.topic_arn.clone(),
            source: cli.queue_url.clone(),
        },
    );

    print_banner(&BannerInfo {
        topic: &cli.topic,
        topic_arn: &cli.topic_arn,
        queue_url: &cli.queue_url,
        wait_time_seconds: cli.wait_time_seconds,
    });

    // Async stdin so Ctrl+C is caught even while waiting at the prompt
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\ntally> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {e}");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        match input::classify(line) {
            Input::Exit => break,
            Input::Invalid => {
                eprintln!("not a number: enter a decimal integer, or `exit`");
            }
            Input::Push(value) => {
                // Any failure past input validation ends the session;
                // the error chain names the stage that died.
                let total = session.push(value).await?;
                println!("total is now {total}");
            }
        }
    }

    print_session_summary(session.pushes(), session.total());
    Ok(())
}
