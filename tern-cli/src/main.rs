//! Tern CLI
//!
//! Parse an HTML file or string and print the resulting tree, the token
//! stream, the serialized markup or a JSON view of the document.

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use serde_json::{Value, json};
use tern_dom::{DomTree, NodeType};
use tern_html::{
    HTMLParser, ParseIssue, ParserOptions, Preprocessor, Token, Tokenizer, dump_tree,
    serialize_with_scripting,
};

/// Tern: a WHATWG HTML tokenizer and tree builder
#[derive(Parser, Debug)]
#[command(name = "tern")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    tern ./index.html

    # Parse inline HTML
    tern --html '<p>Hello<b>world'

    # Show the token stream
    tern --tokens --html '<a href=x>link</a>'

    # Parse a fragment as the contents of a <tr>
    tern --fragment tr --html '<td>cell'

    # Round-trip through the serializer, listing parse errors
    tern --serialize --errors ./index.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Print the serialized document instead of the tree
    #[arg(long, conflicts_with = "tokens")]
    serialize: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Parse as a fragment; the context element defaults to <template>
    #[arg(
        long,
        value_name = "CONTEXT",
        num_args = 0..=1,
        default_missing_value = "template"
    )]
    fragment: Option<String>,

    /// List parse errors on stderr
    #[arg(long)]
    errors: bool,

    /// Parse with the scripting flag disabled
    #[arg(long)]
    no_scripting: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let html = load_input(&cli)?;
    let color = std::io::stdout().is_terminal() && !cli.json;

    if cli.tokens {
        return print_tokens(&html, &cli, color);
    }

    let options = ParserOptions::default()
        .with_scripting(!cli.no_scripting)
        .with_collect_errors(cli.errors);
    let (tree, issues) = parse_input(&html, cli.fragment.as_deref(), options)?;

    if cli.json {
        let document = json!({
            "quirksMode": tree.quirks_mode().to_string(),
            "root": tree.root().0,
            "nodes": tree_to_json(&tree),
            "errors": issues,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    if cli.serialize {
        println!(
            "{}",
            serialize_with_scripting(&tree, &tree.root(), options.scripting_enabled)
        );
    } else {
        if color {
            println!("{}", "=== DOM Tree ===".bold());
        }
        print!("{}", dump_tree(&tree, &tree.root()));
    }

    if cli.errors {
        print_issues(&issues, color);
    }
    Ok(())
}

/// Read the document from `--html` or the positional path.
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
    } else {
        bail!("no input: pass a FILE or --html '<markup>' (see --help)")
    }
}

/// Parse a document or fragment and return the tree with its parse errors.
fn parse_input(
    html: &str,
    fragment: Option<&str>,
    options: ParserOptions,
) -> Result<(DomTree, Vec<ParseIssue>)> {
    let mut parser = match fragment {
        Some(context) => {
            let tree = DomTree::new_fragment();
            HTMLParser::new_fragment(tree, html, context, options)
                .with_context(|| format!("cannot parse a fragment in <{context}>"))?
        }
        None => HTMLParser::new(DomTree::new(), html, options),
    };
    let status = parser.run()?;
    log::debug!("parser stopped: {status}");
    let (tree, _, issues) = parser.into_parts();
    Ok((tree, issues))
}

fn print_tokens(html: &str, cli: &Cli, color: bool) -> Result<()> {
    let options = tern_html::TokenizerOptions::default()
        .with_collect_errors(cli.errors)
        .with_location_info(true);
    let mut tokenizer = Tokenizer::with_options(Preprocessor::new(html), options);
    let mut tokens = Vec::new();
    loop {
        let located = tokenizer.next_located_token();
        let done = located.value.is_eof();
        tokens.push(located);
        if done {
            break;
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for located in &tokens {
            let span = format!("{:>5}..{:<5}", located.span.start, located.span.end);
            let description = describe_token(&located.value);
            if color {
                println!("{} {}", span.dimmed(), description.cyan());
            } else {
                println!("{span} {description}");
            }
        }
    }

    if cli.errors {
        print_issues(tokenizer.issues(), color);
    }
    Ok(())
}

/// One-line rendering of a token.
fn describe_token(token: &Token) -> String {
    match token {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => format!(
            "DOCTYPE name={name:?} public={public_identifier:?} \
             system={system_identifier:?} force_quirks={force_quirks}"
        ),
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            let mut out = format!("<{name}");
            for attr in attributes {
                out.push_str(&format!(" {}={:?}", attr.name, attr.value));
            }
            out.push_str(if *self_closing { " />" } else { ">" });
            out
        }
        Token::EndTag { name, .. } => format!("</{name}>"),
        Token::Comment { data } => format!("<!--{data}-->"),
        Token::Character { data } => format!("Character {data:?}"),
        Token::NullCharacter { data } => format!("NullCharacter x{}", data.chars().count()),
        Token::Whitespace { data } => format!("Whitespace {data:?}"),
        Token::EndOfFile => "EOF".to_string(),
    }
}

fn print_issues(issues: &[ParseIssue], color: bool) {
    if issues.is_empty() {
        return;
    }
    eprintln!();
    for issue in issues {
        if color {
            let red = "error:".red();
            let label = red.bold();
            let code = issue.code.yellow();
            eprintln!("{label} {code} at offset {}", issue.offset);
        } else {
            eprintln!("error: {} at offset {}", issue.code, issue.offset);
        }
    }
    eprintln!("{} parse error(s)", issues.len());
}

/// JSON view of the tree: a flat list of nodes in tree order, each naming its
/// children by id. A template's contents follow its descendants.
fn tree_to_json(tree: &DomTree) -> Vec<Value> {
    let mut nodes = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let mut value = match &node.node_type {
            NodeType::Document { quirks_mode } => json!({
                "type": "document",
                "quirksMode": quirks_mode.to_string(),
            }),
            NodeType::DocumentFragment => json!({ "type": "fragment" }),
            NodeType::DocumentType(doctype) => json!({
                "type": "doctype",
                "name": doctype.name,
                "publicId": doctype.public_id,
                "systemId": doctype.system_id,
            }),
            NodeType::Element(data) => {
                let namespace: &str = data.namespace.as_ref();
                json!({
                    "type": "element",
                    "tagName": data.tag_name,
                    "namespace": namespace,
                    "attributes": data.attrs,
                })
            }
            NodeType::Text(text) => json!({ "type": "text", "data": text }),
            NodeType::Comment(data) => json!({ "type": "comment", "data": data }),
        };
        value["id"] = json!(id.0);

        if let Some(contents) = tree.template_contents(id) {
            value["content"] = json!(contents.0);
            stack.push(contents);
        }
        let children = tree.children(id);
        if !children.is_empty() {
            let ids: Vec<usize> = children.iter().map(|child| child.0).collect();
            value["children"] = json!(ids);
            stack.extend(children.iter().rev());
        }
        nodes.push(value);
    }
    nodes
}
