use std::path::PathBuf;

use anyhow::Context as _;
use assetspec_expr::expression::{
    ExpressionFunction as _, TokenKind, format_literal, parse_literal, scan,
};
use assetspec_expr::{
    Expression, FunctionCatalog, OperationRegistry, ParseOptions, SpecLoader, StaticContext,
    TypedValue, Value, ValueKind,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "assetspec-expr", version)]
struct Cli {
    /// Log parsing and evaluation details to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an expression.
    Eval(EvalArgs),
    /// Parse an expression and print its canonical text.
    Fmt(FmtArgs),
    /// Print the scanner's tokens for an expression.
    Tokens(TokensArgs),
    /// Load a switch from a JSON file and evaluate it.
    Switch(SwitchArgs),
    /// List the built-in functions.
    Functions,
}

#[derive(Args, Debug)]
struct Evaluation {
    /// Fold reference-free nested calls while parsing.
    #[arg(long)]
    simplify: bool,

    /// Property value visible to references, as NAME=VALUE (repeatable).
    #[arg(long = "prop", value_name = "NAME=VALUE", value_parser = parse_prop)]
    props: Vec<(String, Value<'static>)>,

    /// Desired result kind (e.g. int32, float, string).
    #[arg(long = "as", value_name = "KIND")]
    kind: Option<ValueKind>,
}

impl Evaluation {
    fn options(&self) -> ParseOptions {
        ParseOptions {
            simplify_constants: self.simplify,
        }
    }

    fn context(&self) -> StaticContext {
        let mut ctx = StaticContext::new();
        for (name, value) in &self.props {
            ctx.set_property(name, value.clone());
        }
        ctx
    }
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Expression text, e.g. `=ADD(@Damage 2)`.
    expr: String,

    #[command(flatten)]
    eval: Evaluation,
}

#[derive(Parser, Debug)]
struct FmtArgs {
    expr: String,

    /// Fold reference-free nested calls while parsing.
    #[arg(long)]
    simplify: bool,
}

#[derive(Parser, Debug)]
struct TokensArgs {
    expr: String,
}

#[derive(Parser, Debug)]
struct SwitchArgs {
    /// Switch JSON: a case array or an object with `Cases`.
    path: PathBuf,

    #[command(flatten)]
    eval: Evaluation,
}

fn parse_prop(text: &str) -> Result<(String, Value<'static>), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{text}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("property name is empty".to_owned());
    }
    Ok((name.to_owned(), parse_literal(value)))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Fmt(args) => cmd_fmt(args),
        Command::Tokens(args) => cmd_tokens(args),
        Command::Switch(args) => cmd_switch(args),
        Command::Functions => cmd_functions(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_value(value: &Value<'_>) {
    match value {
        Value::Str(text) => println!("{text}"),
        other => println!("{}", format_literal(other)),
    }
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let catalog = FunctionCatalog::with_builtins();
    let expr = Expression::parse_with(&args.expr, &catalog, &args.eval.options())
        .with_context(|| format!("parse expression '{}'", args.expr))?;
    let ctx = args.eval.context();
    let value = expr
        .resolve(Some(&ctx), args.eval.kind)
        .with_context(|| format!("evaluate expression '{expr}'"))?;
    print_value(&value);
    Ok(())
}

fn cmd_fmt(args: FmtArgs) -> anyhow::Result<()> {
    let catalog = FunctionCatalog::with_builtins();
    let options = ParseOptions {
        simplify_constants: args.simplify,
    };
    let expr = Expression::parse_with(&args.expr, &catalog, &options)
        .with_context(|| format!("parse expression '{}'", args.expr))?;
    println!("={expr}");
    Ok(())
}

fn cmd_tokens(args: TokensArgs) -> anyhow::Result<()> {
    let tokens = scan(&args.expr).with_context(|| format!("scan expression '{}'", args.expr))?;
    for token in tokens {
        let span = format!("{}..{}", token.span.start, token.span.end);
        match token.kind {
            TokenKind::FunctionName(name) => println!("{span:>8}  name       {name}"),
            TokenKind::OpenParams => println!("{span:>8}  open"),
            TokenKind::CloseParams => println!("{span:>8}  close"),
            TokenKind::ArgumentSeparator => println!("{span:>8}  separator"),
            TokenKind::Value { kind, text } => {
                println!("{span:>8}  {:<10} {text}", format!("{kind:?}").to_lowercase())
            }
        }
    }
    Ok(())
}

fn cmd_switch(args: SwitchArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("read switch '{}'", args.path.display()))?;
    let catalog = FunctionCatalog::with_builtins();
    let operations = OperationRegistry::with_builtins();
    let loader = SpecLoader::new(&catalog, &operations).with_options(args.eval.options());
    let mut switch = loader
        .switch_from_str(&text)
        .with_context(|| format!("load switch '{}'", args.path.display()))?;
    if args.eval.simplify {
        switch = switch.simplified();
    }

    let ctx = args.eval.context();
    let value = switch
        .resolve(Some(&ctx), args.eval.kind)
        .with_context(|| format!("no case of '{}' could be selected", args.path.display()))?;
    print_value(&value);
    Ok(())
}

fn cmd_functions() -> anyhow::Result<()> {
    let catalog = FunctionCatalog::with_builtins();
    for function in catalog.enumerate() {
        println!("{:<24} {}", function.name(), function.arity());
    }
    Ok(())
}
