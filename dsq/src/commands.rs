//! CLI command implementations.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use finder::catalog::{CatalogSources, Embedding};
use finder::init;
use finder::query::{Composer, HeadlessSurface};
use finder::{
    Action, BuilderOptions, Button, Config, Error, Labels, OperatorCode, QueryBuilder,
    QueryBuilderValue, Selection,
};

/// Where the catalog comes from and how it is shaped.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Catalog sources JSON (defaults to sources.json under the root)
    #[arg(short = 's', long = "sources")]
    pub sources: Option<PathBuf>,

    /// Driver whose own attributes are added to the catalog
    #[arg(short = 'd', long = "driver")]
    pub driver: Option<String>,

    /// Build the search-toolbox catalog (adds compliance rules)
    #[arg(short = 't', long = "toolbox")]
    pub toolbox: bool,
}

/// One replayed user interaction.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Attribute(String),
    Operator(OperatorCode),
    Choice(String),
    Caret(usize),
    Select(usize, usize),
    Type(String),
    Press(Button),
    Driver(Option<String>),
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidStep(s.to_string());

        let step = match s.split_once('=') {
            None => match s.to_ascii_lowercase().as_str() {
                "not" => Step::Press(Button::Not),
                "and" => Step::Press(Button::And),
                "or" => Step::Press(Button::Or),
                "clear" => Step::Press(Button::Clear),
                _ => return Err(invalid()),
            },
            Some(("attr", name)) => Step::Attribute(name.to_string()),
            Some(("op", code)) => Step::Operator(code.parse().map_err(|_| invalid())?),
            Some(("choice", label)) => Step::Choice(label.to_string()),
            Some(("caret", n)) => Step::Caret(n.parse().map_err(|_| invalid())?),
            Some(("select", range)) => {
                let (a, b) = range.split_once(':').ok_or_else(invalid)?;
                Step::Select(
                    a.parse().map_err(|_| invalid())?,
                    b.parse().map_err(|_| invalid())?,
                )
            }
            Some(("type", text)) => Step::Type(text.to_string()),
            Some(("driver", "any")) => Step::Driver(None),
            Some(("driver", name)) => Step::Driver(Some(name.to_string())),
            Some(_) => return Err(invalid()),
        };
        Ok(step)
    }
}

/// Load config, labels and sources, and mount a headless builder.
fn open_builder(
    args: &CatalogArgs,
    query: &str,
) -> finder::Result<(Config, QueryBuilder<HeadlessSurface>)> {
    let config = Config::load()?;
    let labels = Labels::load(&config.labels_path())?;
    let sources_path = args.sources.clone().unwrap_or_else(|| config.sources_path());
    let sources = CatalogSources::load(&sources_path)?;

    let embedding = if args.toolbox {
        Embedding::Toolbox
    } else {
        Embedding::Dialog
    };
    let options = BuilderOptions::from_config(&config, labels).with_embedding(embedding);

    let mut builder = QueryBuilder::new(
        options,
        sources,
        QueryBuilderValue {
            driver: None,
            query: query.to_string(),
        },
        HeadlessSurface::default(),
    );
    if let Some(driver) = &args.driver {
        builder.select_driver(Some(driver))?;
    }
    Ok((config, builder))
}

pub fn init(force: bool) -> finder::Result<()> {
    let config = Config::default_location()?;

    if init::is_initialized(&config) && !force {
        println!("devsearch already initialized at {}", config.root.display());
        println!("Use --force to overwrite config.toml");
        return Ok(());
    }

    init::initialize(&config, force)?;
    println!("devsearch initialized at {}", config.root.display());
    Ok(())
}

pub fn attributes(args: &CatalogArgs, filter: Option<&str>, format: &str) -> finder::Result<()> {
    let (_, builder) = open_builder(args, "")?;
    let catalog = builder.catalog();
    let attributes = match filter {
        Some(pattern) => catalog.matching(pattern),
        None => catalog.iter().collect(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&attributes)?),
        "table" => {
            println!("{:<36} {:<10} TITLE", "NAME", "TYPE");
            for attr in attributes {
                println!("{:<36} {:<10} {}", attr.name, attr.semantic_type.to_string(), attr.title);
            }
        }
        other => return Err(Error::Config(format!("Unknown format: {}", other))),
    }
    Ok(())
}

pub fn actions(attribute: &str, args: &CatalogArgs) -> finder::Result<()> {
    let (config, mut builder) = open_builder(args, "")?;
    builder.select_attribute(attribute);
    let attr = builder
        .selected_attribute()
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("attribute {}", attribute)))?;

    let composer = Composer::new(&config.examples);
    println!("{:<20} FRAGMENT", "ACTION");
    for action in builder.actions() {
        let kind = match action {
            Action::Operator(op) => op.code.to_string(),
            Action::Choice(_) => "IS".to_string(),
        };
        println!(
            "{:<20} {}",
            format!("{} ({})", action.label(), kind),
            action.fragment(&attr, &composer).text
        );
    }
    Ok(())
}

pub fn build(args: &CatalogArgs, query: &str, steps: &[String]) -> finder::Result<()> {
    let steps = steps
        .iter()
        .map(|s| s.parse::<Step>())
        .collect::<finder::Result<Vec<_>>>()?;

    let (_, mut builder) = open_builder(args, query)?;
    for step in steps {
        apply(&mut builder, step)?;
        builder.after_render();
    }

    println!("{}", serde_json::to_string_pretty(&builder.submit())?);
    Ok(())
}

fn apply(builder: &mut QueryBuilder<HeadlessSurface>, step: Step) -> finder::Result<()> {
    match step {
        Step::Attribute(name) => {
            builder.select_attribute(&name);
            if builder.selected_attribute().is_none() {
                return Err(Error::NotFound(format!("attribute {}", name)));
            }
        }
        Step::Operator(code) => {
            builder.activate_operator(code).ok_or_else(|| {
                Error::InvalidStep(format!("operator {} not offered for the selected attribute", code))
            })?;
        }
        Step::Choice(label) => {
            builder.activate_choice(&label).ok_or_else(|| {
                Error::InvalidStep(format!("choice {} not offered for the selected attribute", label))
            })?;
        }
        Step::Caret(n) => builder.select(Selection::caret(n)),
        Step::Select(a, b) => builder.select(Selection::new(a, b)),
        Step::Type(text) => {
            let end = text.chars().count();
            builder.type_text(text);
            builder.select(Selection::caret(end));
        }
        Step::Press(button) => builder.press(button),
        Step::Driver(name) => builder.select_driver(name.as_deref())?,
    }
    Ok(())
}
