use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use percolate::client::TagTextRequest;
use percolate::{FormState, InputMode, PercolateClient, PercolateClientBuilder, PercolateError};

/// percolate - content tagging client for the percolator backend
#[derive(Parser)]
#[command(name = "percolate")]
#[command(about = "Tag text, files, and URLs against a percolator tagging backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Run the interactive TUI (the default)
    Tui,
    /// Tag a single input and print the matched tags per domain
    Tag(TagCommand),
    /// List the tag domains the backend knows about
    Domains,
}

/// Tag one input source
#[derive(Args)]
struct TagCommand {
    /// Inline text to tag
    #[arg(long, value_name = "TEXT", group = "source")]
    text: Option<String>,

    /// File whose contents to tag
    #[arg(long, value_name = "PATH", group = "source")]
    file: Option<PathBuf>,

    /// URL whose content to tag
    #[arg(long, value_name = "URL", group = "source")]
    url: Option<String>,

    /// Comma-separated domains to tag against (empty means all)
    #[arg(short, long, value_name = "DOMAINS")]
    domains: Option<String>,

    /// Show relevance scores next to each tag
    #[arg(short, long)]
    scores: bool,
}

fn main() {
    // Pick up PERCOLATE_URL from a local .env, if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match &cli.command {
        None | Some(Commands::Tui) => percolate::tui::run(),
        Some(Commands::Tag(cmd)) => handle_tag(cmd),
        Some(Commands::Domains) => handle_domains(),
    };

    if let Err(e) = result {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors include missing or invalid inputs: an empty source, an
/// unsubmittable form, an unreadable chosen file, or a bad backend URL.
fn is_user_error(error: &anyhow::Error) -> bool {
    if let Some(e) = error.downcast_ref::<PercolateError>() {
        return matches!(
            e,
            PercolateError::Form(_) | PercolateError::File(_) | PercolateError::InvalidUrl(_)
        );
    }
    error.to_string().contains("cannot be empty")
}

/// Handles the tag command by dispatching one tagging request.
fn handle_tag(cmd: &TagCommand) -> Result<()> {
    let form = build_form(cmd)?;
    let client = build_client()?;

    // Inline text goes over the JSON transport; file and URL sources need
    // the multipart form.
    let response = if form.mode() == InputMode::Text {
        let request = TagTextRequest::from_form(&form)?;
        client.tag_text(&request)
    } else {
        client.tag_form(&form)
    }
    .context("Tagging request failed")?;

    print!("{}", percolate::report::render(&response, cmd.scores));
    Ok(())
}

/// Handles the domains command by listing the backend's tag domains.
fn handle_domains() -> Result<()> {
    let client = build_client()?;
    let listing = client
        .list_domains()
        .context("Failed to list tag domains")?;

    for (name, info) in &listing {
        println!("{}  {} ({} tags)", name, info.description, info.tags_count);
    }
    Ok(())
}

fn build_client() -> Result<PercolateClient> {
    Ok(PercolateClientBuilder::new().build()?)
}

/// Builds the form state the given tag command describes.
///
/// Exactly one source is present (clap enforces the group); the matching
/// input mode is selected and filled, and the form must come out
/// submittable.
fn build_form(cmd: &TagCommand) -> Result<FormState> {
    let mut form = FormState::new();

    if let Some(text) = &cmd.text {
        if text.trim().is_empty() {
            anyhow::bail!("Text to tag cannot be empty");
        }
        for c in text.chars() {
            form.push_char(c);
        }
    } else if let Some(path) = &cmd.file {
        form.select_mode(InputMode::File);
        form.choose_file(path.as_path());
    } else if let Some(url) = &cmd.url {
        if url.trim().is_empty() {
            anyhow::bail!("URL to tag cannot be empty");
        }
        form.select_mode(InputMode::Url);
        for c in url.chars() {
            form.push_char(c);
        }
    } else {
        return Err(
            PercolateError::Form("one of --text, --file or --url is required".to_string()).into(),
        );
    }

    for domain in percolate::domains::parse_list(cmd.domains.as_deref().unwrap_or("")) {
        form.toggle_domain(&domain);
    }
    if cmd.scores {
        form.toggle_score_display();
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_command() -> TagCommand {
        TagCommand {
            text: None,
            file: None,
            url: None,
            domains: None,
            scores: false,
        }
    }

    #[test]
    fn build_form_with_text_source() {
        let cmd = TagCommand {
            text: Some("lions in kenya".to_string()),
            domains: Some("speciesplus, countries".to_string()),
            scores: true,
            ..tag_command()
        };

        let form = build_form(&cmd).expect("form should build");
        assert_eq!(form.mode(), InputMode::Text);
        assert_eq!(form.text(), "lions in kenya");
        assert_eq!(form.joined_domains(), "countries,speciesplus");
        assert!(form.score_display());
        assert!(form.is_valid());
    }

    #[test]
    fn build_form_with_file_source() {
        let cmd = TagCommand {
            file: Some(PathBuf::from("/tmp/report.txt")),
            ..tag_command()
        };

        let form = build_form(&cmd).expect("form should build");
        assert_eq!(form.mode(), InputMode::File);
        assert_eq!(form.file_label(), "report.txt");
        assert!(form.is_valid());
    }

    #[test]
    fn build_form_with_url_source() {
        let cmd = TagCommand {
            url: Some("https://example.com/article".to_string()),
            ..tag_command()
        };

        let form = build_form(&cmd).expect("form should build");
        assert_eq!(form.mode(), InputMode::Url);
        assert_eq!(form.url(), "https://example.com/article");
    }

    #[test]
    fn build_form_rejects_empty_text() {
        let cmd = TagCommand {
            text: Some("   ".to_string()),
            ..tag_command()
        };

        let error = build_form(&cmd).expect_err("empty text should be rejected");
        assert!(is_user_error(&error));
    }

    #[test]
    fn build_form_without_source_is_a_user_error() {
        let error = build_form(&tag_command()).expect_err("missing source should be rejected");
        assert!(error.to_string().contains("--text"));
        // Maps to exit code 1, not the internal-error code.
        assert!(is_user_error(&error));
    }

    #[test]
    fn form_errors_map_to_user_exit_code() {
        let error = anyhow::Error::from(PercolateError::Form("no file chosen".to_string()));
        assert!(is_user_error(&error));

        let error = anyhow::Error::from(PercolateError::Http { status: 500 });
        assert!(!is_user_error(&error));
    }

    #[test]
    fn cli_parses_tag_subcommand() {
        let cli = Cli::try_parse_from([
            "percolate",
            "tag",
            "--text",
            "lions",
            "--domains",
            "countries",
            "--scores",
        ])
        .expect("args should parse");

        match cli.command {
            Some(Commands::Tag(cmd)) => {
                assert_eq!(cmd.text.as_deref(), Some("lions"));
                assert!(cmd.scores);
            }
            _ => panic!("expected tag subcommand"),
        }
    }

    #[test]
    fn cli_rejects_multiple_sources() {
        let result = Cli::try_parse_from([
            "percolate",
            "tag",
            "--text",
            "lions",
            "--url",
            "https://example.com",
        ]);
        assert!(result.is_err(), "sources are mutually exclusive");
    }

    #[test]
    fn cli_defaults_to_tui_when_no_subcommand() {
        let cli = Cli::try_parse_from(["percolate"]).expect("bare invocation should parse");
        assert!(cli.command.is_none());
    }
}
