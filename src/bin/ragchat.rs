//! ragchat: command-line access to a RAG chat backend
//!
//! Configuration comes from `RAGCHAT_*` environment variables; run
//! `ragchat help` for the command list.

use anyhow::{bail, Context};
use futures::StreamExt;
use ragchat_client::client::UploadFile;
use ragchat_client::types::ChatMessage;
use ragchat_client::{AuthToken, ChatAppRequest, RagClient};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let client = RagClient::from_env().context("loading RAGCHAT_* configuration")?;
    let token = std::env::var("RAGCHAT_TOKEN").ok().map(AuthToken::new);
    let rest = &args[2..];

    match args[1].as_str() {
        "config" => cmd_config(&client).await,
        "auth-setup" => cmd_auth_setup(&client).await,
        "ask" => cmd_ask(&client, rest, token.as_ref()).await,
        "chat" => cmd_chat(&client, rest, token.as_ref()).await,
        "speech" => cmd_speech(&client, rest).await,
        "citation" => {
            let name = rest.first().context("citation needs a file name")?;
            println!("{}", client.citation_file_path(name));
            Ok(())
        }
        "uploads" => {
            for name in client.list_uploaded_files(token.as_ref()).await? {
                println!("{name}");
            }
            Ok(())
        }
        "upload" => cmd_upload(&client, rest, token.as_ref()).await,
        "delete-upload" => {
            let name = rest.first().context("delete-upload needs a file name")?;
            let resp = client.delete_uploaded_file(name, token.as_ref()).await?;
            println!("{}", resp.message.unwrap_or_default());
            Ok(())
        }
        "history" => cmd_history(&client, rest, token.as_ref()).await,
        "session" => {
            let id = rest.first().context("session needs an id")?;
            let session = client.get_chat_history(id, require(token.as_ref())?).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
            Ok(())
        }
        "delete-session" => {
            let id = rest.first().context("delete-session needs an id")?;
            client.delete_chat_history(id, require(token.as_ref())?).await?;
            println!("deleted {id}");
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"ragchat: RAG chat backend client

USAGE:
    ragchat <COMMAND> [OPTIONS]

COMMANDS:
    config                          Show backend feature flags
    auth-setup                      Show backend login configuration
    ask <question>                  Single-turn question
    chat [--stream] <message>...    Chat; messages alternate user/assistant, last one is the question
    speech <text> --out <file>      Synthesize speech to a file
    citation <file>                 Print the citation URL for a source document
    uploads                         List uploaded files
    upload <path>                   Upload a file
    delete-upload <name>            Delete an uploaded file
    history [--count N] [--continue TOKEN]
                                    List chat history sessions
    session <id>                    Show one chat history session
    delete-session <id>             Delete one chat history session

ENVIRONMENT:
    RAGCHAT_BACKEND_URI             Backend base URI (default http://localhost:8080/api)
    RAGCHAT_LOGIN_MODE              disabled | enabled | app_services
    RAGCHAT_STREAM_ROUTE            accept | path_suffix
    RAGCHAT_TOKEN                   Identity token sent as a bearer credential
    RUST_LOG                        Log filter, e.g. ragchat_client=debug"#
    );
}

fn require(token: Option<&AuthToken>) -> anyhow::Result<&AuthToken> {
    token.context("this command needs RAGCHAT_TOKEN")
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

async fn cmd_config(client: &RagClient) -> anyhow::Result<()> {
    let cfg = client.get_config().await?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

async fn cmd_auth_setup(client: &RagClient) -> anyhow::Result<()> {
    let setup = client.get_auth_setup().await?;
    println!("{}", serde_json::to_string_pretty(&setup)?);
    Ok(())
}

async fn cmd_ask(client: &RagClient, args: &[String], token: Option<&AuthToken>) -> anyhow::Result<()> {
    if args.is_empty() {
        bail!("ask needs a question");
    }
    let question = args.join(" ");
    let resp = client.ask(&ChatAppRequest::question(question), token).await?;
    print_answer(&resp);
    Ok(())
}

async fn cmd_chat(client: &RagClient, args: &[String], token: Option<&AuthToken>) -> anyhow::Result<()> {
    let stream = args.iter().any(|a| a == "--stream");
    let turns: Vec<&String> = args.iter().filter(|a| *a != "--stream").collect();
    if turns.is_empty() {
        bail!("chat needs at least one message");
    }
    let messages = turns
        .iter()
        .enumerate()
        .map(|(i, text)| {
            if i % 2 == 0 {
                ChatMessage::user(text.as_str())
            } else {
                ChatMessage::assistant(text.as_str())
            }
        })
        .collect();
    let request = ChatAppRequest::new(messages);

    if !stream {
        let resp = client.chat(request, token).await?;
        print_answer(&resp);
        return Ok(());
    }

    let chat = client.chat_stream(request, token).await?;
    if !chat.status().is_success() {
        bail!("stream request failed with status {}", chat.status());
    }
    let mut lines = chat.lines();
    while let Some(line) = lines.next().await {
        println!("{}", line?);
    }
    Ok(())
}

async fn cmd_speech(client: &RagClient, args: &[String]) -> anyhow::Result<()> {
    let out = flag_value(args, "--out").context("speech needs --out <file>")?;
    let text: Vec<&str> = args
        .iter()
        .take_while(|a| *a != "--out")
        .map(String::as_str)
        .collect();
    match client.get_speech(&text.join(" ")).await? {
        Some(audio) => {
            std::fs::write(&out, &audio.data).with_context(|| format!("writing {out}"))?;
            println!("wrote {} bytes ({}) to {out}", audio.data.len(), audio.content_type);
        }
        None => println!("speech output is not available"),
    }
    Ok(())
}

async fn cmd_upload(client: &RagClient, args: &[String], token: Option<&AuthToken>) -> anyhow::Result<()> {
    let path = PathBuf::from(args.first().context("upload needs a path")?);
    let data = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("path has no file name")?
        .to_string();
    let resp = client.upload_file(UploadFile::new(name, data), token).await?;
    println!("{}", resp.message.unwrap_or_default());
    Ok(())
}

async fn cmd_history(client: &RagClient, args: &[String], token: Option<&AuthToken>) -> anyhow::Result<()> {
    let count = match flag_value(args, "--count") {
        Some(raw) => Some(raw.parse::<u32>().context("--count must be a number")?),
        None => None,
    };
    let cont = flag_value(args, "--continue");
    let page = client
        .list_chat_history(count, cont.as_deref(), require(token)?)
        .await?;
    for s in &page.sessions {
        println!("{}\t{}\t{}", s.id, s.timestamp, s.title);
    }
    if let Some(next) = page.continuation_token {
        println!("next: {next}");
    }
    Ok(())
}

fn print_answer(resp: &ragchat_client::ChatAppResponse) {
    let Some(choice) = resp.choices.first() else {
        println!("(no answer)");
        return;
    };
    println!("{}", choice.message.content);
    for dp in &choice.context.data_points {
        println!("  - {dp}");
    }
}
