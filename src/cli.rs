// File: ./src/cli.rs
//! Command-line parsing and the commands behind the `crampon` binary.
//!
//! Commands return their output as a `String`; the binary does the printing.

use crate::config::{Config, DecorationMode, Dimension};
use crate::context::AppContext;
use crate::model::{PartitionError, partition};
use crate::render::{MarkupSurface, Renderer};
use crate::source::{self, ListSource};
use anyhow::{Context, Result, bail};
use std::fmt::Write;
use strum::IntoEnumIterator;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub mode: Option<DecorationMode>,
    pub width: Option<Dimension>,
    pub marker_width: Option<Dimension>,
    pub radius: Option<Dimension>,
    pub color: Option<String>,
    pub icons: Vec<(String, String)>,
    pub item_height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Render(RenderArgs),
    Groups { input: PathBuf, json: bool },
    Config { init: bool },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// `--root <path>`: keep the config under this directory instead of the OS default.
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn take_value<'a, I>(flag: &str, iter: &mut I) -> Result<&'a str>
where
    I: Iterator<Item = &'a String>,
{
    iter.next()
        .map(String::as_str)
        .with_context(|| format!("{} expects a value", flag))
}

fn parse_dimension(flag: &str, value: &str) -> Result<Dimension> {
    value
        .parse::<Dimension>()
        .with_context(|| format!("bad value for {}", flag))
}

/// Parses the arguments after the binary name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut root = None;
    let mut positional: Vec<&str> = Vec::new();
    let mut render = RenderArgs::default();
    let mut json = false;
    let mut init = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                return Ok(Invocation {
                    root,
                    command: Command::Help,
                });
            }
            "-r" | "--root" => root = Some(PathBuf::from(take_value(arg, &mut iter)?)),
            "-c" | "--config" => {
                render.config = Some(PathBuf::from(take_value(arg, &mut iter)?))
            }
            "--mode" => {
                let value = take_value(arg, &mut iter)?;
                render.mode = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow::anyhow!("unknown mode '{}'", value))?,
                );
            }
            "--width" => render.width = Some(parse_dimension(arg, take_value(arg, &mut iter)?)?),
            "--marker-width" => {
                render.marker_width = Some(parse_dimension(arg, take_value(arg, &mut iter)?)?)
            }
            "--radius" => {
                render.radius = Some(parse_dimension(arg, take_value(arg, &mut iter)?)?)
            }
            "--color" => render.color = Some(take_value(arg, &mut iter)?.to_string()),
            "--icon" => {
                let value = take_value(arg, &mut iter)?;
                let (tag, src) = value
                    .split_once('=')
                    .with_context(|| format!("--icon expects tag=src, got '{}'", value))?;
                render.icons.push((tag.to_string(), src.to_string()));
            }
            "--item-height" => {
                let value = take_value(arg, &mut iter)?;
                let height = value
                    .trim_end_matches("px")
                    .parse::<f32>()
                    .ok()
                    .filter(|h| h.is_finite() && *h > 0.0)
                    .with_context(|| format!("bad value for --item-height: '{}'", value))?;
                render.item_height = Some(height);
            }
            "--json" => json = true,
            "--init" => init = true,
            other if other.starts_with('-') => bail!("unknown option '{}'", other),
            other => positional.push(other),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Help,
        ["render", input] => Command::Render(RenderArgs {
            input: PathBuf::from(*input),
            ..render
        }),
        ["groups", input] => Command::Groups {
            input: PathBuf::from(*input),
            json,
        },
        ["config"] => Command::Config { init },
        ["render" | "groups"] => bail!("missing input file"),
        [cmd, ..] => bail!("unexpected arguments after '{}'", cmd),
    };

    Ok(Invocation { root, command })
}

fn read_list(path: &Path) -> Result<ListSource> {
    let markup = fs::read_to_string(path)
        .with_context(|| format!("Failed to read list file '{}'", path.display()))?;
    source::parse_list(&markup).with_context(|| format!("In '{}'", path.display()))
}

/// Config file, then command-line overrides on top.
fn effective_config(args: &RenderArgs, ctx: &dyn AppContext) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_default(ctx)?,
    };

    if let Some(mode) = args.mode {
        config = config.with_mode(mode);
    }
    if let Some(width) = args.width {
        config = config.with_width(width);
    }
    if let Some(marker_width) = args.marker_width {
        config = config.with_marker_width(marker_width);
    }
    if let Some(radius) = args.radius {
        config = config.with_radius(radius);
    }
    if let Some(color) = &args.color {
        config = config.with_color(color);
    }
    for (tag, src) in &args.icons {
        config = config.with_icon(tag, src);
    }
    Ok(config)
}

pub fn render_command(args: &RenderArgs, ctx: &dyn AppContext) -> Result<String> {
    let config = effective_config(args, ctx)?;
    let list = read_list(&args.input)?;

    let mut surface = MarkupSurface::from_source(&list);
    if let Some(height) = args.item_height {
        surface = surface.with_default_height(height);
    }

    let report = Renderer::new(config).render(&list.items, &mut surface)?;
    if let Some(PartitionError::MissingTag { item }) = &report.skipped {
        log::warn!(
            "Item {} has no {} attribute; group markers were not drawn",
            item,
            source::TAG_ATTRIBUTE
        );
    }
    Ok(surface.to_html())
}

pub fn groups_command(input: &Path, json: bool) -> Result<String> {
    let list = read_list(input)?;
    let mut out = String::new();

    match partition(&list.items) {
        Ok(result) if json => {
            out = serde_json::to_string_pretty(&result)?;
            out.push('\n');
        }
        Ok(result) => {
            for (id, role) in result.roles() {
                let mut flags = Vec::new();
                if role.is_first {
                    flags.push("first");
                }
                if role.is_last {
                    flags.push("last");
                }
                let _ = writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    id.0,
                    role.group_tag,
                    role.group_ordinal,
                    flags.join(" ")
                );
            }
        }
        Err(PartitionError::MissingTag { item }) => {
            let _ = writeln!(out, "missing {} on item {}", source::TAG_ATTRIBUTE, item.0);
        }
    }
    Ok(out)
}

pub fn config_command(init: bool, ctx: &dyn AppContext) -> Result<String> {
    let path = ctx.get_config_file_path()?;
    let config = Config::load_or_default(ctx)?;
    if init && !path.exists() {
        config.save(ctx)?;
    }

    let mut out = format!("# {}\n", path.display());
    out.push_str(&config.to_toml()?);
    Ok(out)
}

pub fn execute(command: &Command, ctx: &dyn AppContext, binary_name: &str) -> Result<String> {
    match command {
        Command::Render(args) => render_command(args, ctx),
        Command::Groups { input, json } => groups_command(input, *json),
        Command::Config { init } => config_command(*init, ctx),
        Command::Help => Ok(help_text(binary_name)),
    }
}

pub fn help_text(binary_name: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Crampon v{} - bracket markers for grouped list items",
        env!("CARGO_PKG_VERSION")
    );
    s.push('\n');
    s.push_str("USAGE:\n");
    let _ = writeln!(s, "    {} render <list.html> [OPTIONS]", binary_name);
    let _ = writeln!(s, "    {} groups <list.html> [--json]", binary_name);
    let _ = writeln!(s, "    {} config [--init]", binary_name);
    let _ = writeln!(s, "    {} --help", binary_name);
    s.push('\n');
    s.push_str("OPTIONS:\n");
    s.push_str("    -r, --root <path>       Use a different directory for the config file.\n");
    s.push_str("    -c, --config <file>     Read this config file instead of the default one.\n");
    let modes: Vec<String> = DecorationMode::iter().map(|m| m.to_string()).collect();
    let _ = writeln!(
        s,
        "    {:<24}Decorate the first item with an icon or its group number.",
        format!("--mode {}", modes.join("|"))
    );
    s.push_str("    --width <px>            Left padding of the list (default 40px).\n");
    s.push_str("    --marker-width <px>     Width of the marker line (default 3px).\n");
    s.push_str("    --radius <px>           Corner radius in ordinal mode (default 7px).\n");
    s.push_str("    --color <color>         Marker color: any CSS color, or 'auto'.\n");
    s.push_str("    --icon <tag=src>        Icon for a group (repeatable).\n");
    s.push_str("    --item-height <px>      Assumed height of each item (default 20px).\n");
    s.push_str("    --json                  Print groups as JSON.\n");
    s.push_str("    --init                  Write the config file if it does not exist.\n");
    s.push_str("    -h, --help              Show this help message.\n");
    s.push('\n');
    s.push_str("Items are <li> elements with a data-crampon attribute. Items sharing a value\n");
    s.push_str("form one group, wherever they appear in the list.\n");
    s.push('\n');
    s.push_str("Logging goes to stderr; set CRAMPON_LOG=debug for details.\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_render_options() {
        let inv = parse_args(&args(&[
            "render",
            "list.html",
            "--mode",
            "ordinal",
            "--width",
            "50",
            "--icon",
            "a=a.png",
            "--root",
            "/tmp/x",
        ]))
        .unwrap();
        assert_eq!(inv.root, Some(PathBuf::from("/tmp/x")));
        let Command::Render(render) = inv.command else {
            panic!("expected render command");
        };
        assert_eq!(render.input, PathBuf::from("list.html"));
        assert_eq!(render.mode, Some(DecorationMode::Ordinal));
        assert_eq!(render.width, Some(Dimension::px(50.0)));
        assert_eq!(render.icons, vec![("a".to_string(), "a.png".to_string())]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["render"])).is_err());
        assert!(parse_args(&args(&["render", "x", "--mode", "sparkles"])).is_err());
        assert!(parse_args(&args(&["render", "x", "--icon", "nosrc"])).is_err());
        assert!(parse_args(&args(&["groups", "x", "--bogus"])).is_err());
        assert!(parse_args(&args(&["render", "x", "--width"])).is_err());
    }

    #[test]
    fn no_arguments_means_help() {
        assert_eq!(parse_args(&[]).unwrap().command, Command::Help);
        assert_eq!(
            parse_args(&args(&["groups", "x", "-h"])).unwrap().command,
            Command::Help
        );
    }
}
