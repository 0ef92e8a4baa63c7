use anyhow::{Context, Result};
use clap::Parser;
use obj_literal::{IndexWidth, LiteralStyle, Mode, ModelLiteralConverter};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "obj-literal")]
#[command(about = "Turn OBJ / .x mesh text into C++ initializer lists")]
#[command(version)]
struct Args {
    /// Input layout
    #[arg(value_enum)]
    mode: Mode,

    input: PathBuf,

    /// Output file (stdout when omitted)
    output: Option<PathBuf>,

    /// TOML file with style settings; flags below override it
    #[arg(long)]
    style: Option<PathBuf>,

    /// Field delimiter (x-vertices; replaces whitespace for vertices)
    #[arg(long)]
    delimiter: Option<char>,

    /// Float literal suffix
    #[arg(long)]
    suffix: Option<String>,

    /// Vector constructor name
    #[arg(long)]
    constructor: Option<String>,

    /// Expression appended after each vertex constructor
    #[arg(long)]
    tag: Option<String>,

    /// Emit as `static const <type> NAME[] =`
    #[arg(long, value_name = "NAME")]
    declare: Option<String>,

    #[arg(long, value_enum)]
    index_width: Option<IndexWidth>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn style(&self) -> Result<LiteralStyle> {
        let mut style = match &self.style {
            Some(path) => LiteralStyle::load(path)?,
            None => LiteralStyle::default(),
        };

        if let Some(delimiter) = self.delimiter {
            match self.mode {
                Mode::Vertices => style.vertex_delimiter = Some(delimiter),
                _ => style.field_delimiter = delimiter,
            }
        }
        if let Some(suffix) = &self.suffix {
            style.float_suffix = suffix.clone();
        }
        if let Some(constructor) = &self.constructor {
            style.constructor = constructor.clone();
        }
        if let Some(tag) = &self.tag {
            style.tag = tag.clone();
        }
        if let Some(name) = &self.declare {
            style.declaration = Some(name.clone());
        }
        if let Some(width) = self.index_width {
            style.index_width = width;
        }
        Ok(style)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let converter = ModelLiteralConverter::new(args.style()?);

    match &args.output {
        Some(output) => {
            converter
                .convert_file(&args.input, output, args.mode)
                .with_context(|| format!("Failed to convert {}", args.input.display()))?;
        }
        None => {
            let text = std::fs::read_to_string(&args.input)
                .with_context(|| format!("Failed to read {}", args.input.display()))?;
            let block = converter
                .convert_str(&text, args.mode)
                .with_context(|| format!("Failed to convert {}", args.input.display()))?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(block.to_string().as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
