use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use sdkgen_core::SchemaContext;
use sdkgen_core::config::{self, CONFIG_FILE_NAME, SdkgenConfig};
use sdkgen_core::parse::parameter::BodyShape;
use sdkgen_core::transform::name_normalizer::{
    is_authenticate_operation_with, pascal_to_snake, title_case,
};
use sdkgen_lua::LuaClientGenerator;
use sdkgen_lua::emitters::client::function_name;
use sdkgen_lua::flatten::BodyFields;
use sdkgen_lua::type_mapper::{FieldKind, definition_snake_name, suffixed_variable_name};

#[derive(Parser)]
#[command(
    name = "sdkgen",
    about = "Swagger 2.0 to Lua client SDK generator",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Path to the Swagger spec file (JSON or YAML)
    input: Option<PathBuf>,

    /// Write the generated module here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file to use instead of ./.sdkgen.yaml
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and normalize a spec without generating code
    Validate {
        /// Path to the Swagger spec file
        input: PathBuf,
    },

    /// Print the names, types and defaults derived from a spec
    Inspect {
        /// Path to the Swagger spec file
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new sdkgen configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        None => cmd_generate(
            cli.input,
            cli.output,
            cli.config,
            Path::new(CONFIG_FILE_NAME),
        ),

        Some(Commands::Validate { input }) => cmd_validate(input),

        Some(Commands::Inspect { input, format }) => cmd_inspect(input, format),

        Some(Commands::Init { force }) => cmd_init(force),

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sdkgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config named on the command line, or `default_path` if present.
fn try_load_config(explicit: Option<&Path>, default_path: &Path) -> Result<SdkgenConfig> {
    match explicit {
        Some(path) => config::load_config(path)?
            .with_context(|| format!("config file {} not found", path.display())),
        None => Ok(config::load_config(default_path)?.unwrap_or_default()),
    }
}

fn load_schema(path: &Path) -> Result<SchemaContext> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let schema = match ext {
        "yaml" | "yml" => {
            log::debug!("loading {} as YAML", path.display());
            SchemaContext::from_yaml(&content)
        }
        _ => {
            log::debug!("loading {} as JSON", path.display());
            SchemaContext::from_json(&content)
        }
    }
    .with_context(|| format!("failed to load {}", path.display()))?;

    Ok(schema)
}

fn print_usage() -> Result<()> {
    eprintln!("No input file given.\n");
    Cli::command().print_help()?;
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    default_config: &Path,
) -> Result<()> {
    let cfg = match try_load_config(config_path.as_deref(), default_config) {
        Ok(cfg) => cfg,
        // An unreadable implicit config must not turn a bare invocation into a failure.
        Err(err) if input.is_none() && config_path.is_none() => {
            log::warn!("ignoring {}: {err:#}", default_config.display());
            return print_usage();
        }
        Err(err) => return Err(err),
    };

    let Some(input) = input.or_else(|| cfg.input.as_ref().map(PathBuf::from)) else {
        return print_usage();
    };

    let schema = load_schema(&input)?;
    let source = LuaClientGenerator
        .generate(&schema, &cfg)
        .with_context(|| format!("failed to generate client for {}", input.display()))?;

    match output.or_else(|| cfg.output.as_ref().map(PathBuf::from)) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&path, source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} from {}", path.display(), input.display());
            eprintln!("Generated {}", path.display());
        }
        None => {
            log::info!("writing client for {} to stdout", input.display());
            print!("{source}");
        }
    }
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let schema = load_schema(&input)?;
    let document = schema.document();

    eprintln!(
        "Valid Swagger {} spec: {}",
        document.swagger.as_deref().unwrap_or("2.0"),
        document.info.title
    );
    eprintln!("  Version: {}", document.info.version);
    eprintln!("  Paths: {}", document.paths.len());
    eprintln!(
        "  Operations: {}",
        document
            .paths
            .values()
            .map(|item| item.operations().count())
            .sum::<usize>()
    );
    eprintln!("  Definitions: {}", document.definitions.len());
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config(None, Path::new(CONFIG_FILE_NAME))?;
    let schema = load_schema(&input)?;

    let summary = build_inspect_summary(&schema, &cfg);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{yaml}");
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn build_inspect_summary(schema: &SchemaContext, cfg: &SdkgenConfig) -> serde_json::Value {
    let definitions: Vec<serde_json::Value> = schema
        .definitions()
        .iter()
        .map(|(name, def)| {
            let snake = pascal_to_snake(&title_case(name));
            if def.is_enum() {
                let prefix = title_case(name).to_uppercase();
                return serde_json::json!({
                    "name": name,
                    "kind": "enum",
                    "constants": def
                        .enum_values
                        .iter()
                        .map(|v| format!("M.{prefix}_{v}"))
                        .collect::<Vec<_>>(),
                });
            }
            let properties: Vec<serde_json::Value> = def
                .properties
                .iter()
                .map(|(prop, p)| {
                    let kind = FieldKind::resolve(schema, &p.schema_type, &p.ref_path);
                    serde_json::json!({
                        "name": prop,
                        "variable": pascal_to_snake(&suffixed_variable_name(
                            schema,
                            prop,
                            &p.schema_type,
                            &p.ref_path,
                        )),
                        "lua_type": kind.lua_type().as_str(),
                        "default": kind.default_literal(),
                    })
                })
                .collect();
            serde_json::json!({
                "name": name,
                "kind": "object",
                "constructor": format!("M.create_{snake}"),
                "properties": properties,
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = schema
        .document()
        .paths
        .iter()
        .flat_map(|(path, item)| {
            item.operations().map(move |(method, op)| {
                let body_arguments: Vec<String> = op
                    .parameters
                    .iter()
                    .filter(|p| p.is_body())
                    .flat_map(|p| {
                        let fields = match p.body_shape() {
                            BodyShape::Reference(r) => BodyFields::flatten(schema, r),
                            BodyShape::Inline(props) => BodyFields::from_properties(schema, props),
                            BodyShape::Primitive(_) | BodyShape::Empty => return Vec::new(),
                        };
                        fields
                            .fields()
                            .iter()
                            .map(|f| f.name.clone())
                            .collect::<Vec<String>>()
                    })
                    .collect();
                serde_json::json!({
                    "function": function_name(op, method, path, &cfg.naming),
                    "method": method.as_str(),
                    "path": path,
                    "body_arguments": body_arguments,
                    "authenticate": is_authenticate_operation_with(
                        &op.operation_id,
                        &cfg.naming.authenticate_prefix,
                    ),
                    "response": op.success_ref().map(definition_snake_name),
                })
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": schema.document().info.title,
            "version": schema.document().info.version,
        },
        "definitions": definitions,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
