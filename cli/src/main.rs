// view-tabs: terminal preview of status-aware view tabs

mod line;
mod tab;

use std::env;
use std::fs;
use std::process;

use serde::Serialize;
use serde_json::Value;
use view_tabs::{ColourField, Grouping, RenderedTab, TabBar};

use crate::line::build_tab_line;
use crate::tab::render_tab;

const DEFAULT_WIDTH: usize = 120;

fn print_help() {
    eprintln!("view-tabs - preview tab labels and colours for build views");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  view-tabs <views.json> [options]        Print the tab line for each top-level view");
    eprintln!("  view-tabs colours <field> [options]     List colour choices for a colour setting");
    eprintln!("  view-tabs --help                        Show this help");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <form.json>   Tab bar settings as a JSON object of form keys");
    eprintln!("  --active <name>        View whose tab is active (default: first)");
    eprintln!("  --width <cols>         Line width (default: $COLUMNS or {})", DEFAULT_WIDTH);
    eprintln!("  --json                 Print rendered tabs as JSON");
    eprintln!();
    eprintln!("Colour fields: default disabled unstable failed");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    input: Option<String>,
    colours: Option<ColourField>,
    config: Option<String>,
    active: Option<String>,
    width: Option<usize>,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => opts.config = Some(value_for(&mut iter, arg)?),
            "--active" => opts.active = Some(value_for(&mut iter, arg)?),
            "--width" => {
                let value = value_for(&mut iter, arg)?;
                let width = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid width '{}'", value))?;
                opts.width = Some(width);
            }
            "--json" => opts.json = true,
            "colours" if opts.input.is_none() && opts.colours.is_none() => {
                let name = value_for(&mut iter, arg)?;
                let field = ColourField::from_name(&name)
                    .ok_or_else(|| format!("unknown colour field '{}'", name))?;
                opts.colours = Some(field);
            }
            other if other.starts_with("--") => return Err(format!("unknown option '{}'", other)),
            other if opts.input.is_none() && opts.colours.is_none() => {
                opts.input = Some(other.to_string());
            }
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }

    if opts.input.is_none() && opts.colours.is_none() {
        return Err("no views file given".to_string());
    }
    Ok(opts)
}

fn value_for<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String, String> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn read_json(path: &str) -> Value {
    let data = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("view-tabs: failed to read {}: {}", path, e);
        process::exit(1);
    });
    serde_json::from_str(&data).unwrap_or_else(|e| {
        eprintln!("view-tabs: failed to parse {}: {}", path, e);
        process::exit(1);
    })
}

fn load_views(value: Value) -> Result<Vec<Grouping>, serde_json::Error> {
    if value.is_array() {
        serde_json::from_value(value)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

fn load_tab_bar(config: Option<&str>) -> TabBar {
    let bar = TabBar::default();
    if let Some(path) = config {
        if let Err(e) = bar.configure(&read_json(path)) {
            eprintln!("view-tabs: bad settings in {}: {}", path, e);
            process::exit(1);
        }
    }
    bar
}

fn line_width(opts: &Options) -> usize {
    opts.width
        .or_else(|| env::var("COLUMNS").ok().and_then(|c| c.parse().ok()))
        .unwrap_or(DEFAULT_WIDTH)
}

#[derive(Serialize)]
struct TabOutput<'a> {
    view: &'a str,
    #[serde(flatten)]
    tab: &'a RenderedTab,
}

fn do_colours(field: ColourField, opts: &Options) {
    let bar = load_tab_bar(opts.config.as_deref());
    for option in bar.colour_options(field) {
        let mark = if option.selected { "*" } else { " " };
        println!("{} {:8} {}", mark, option.name, option.value);
    }
}

fn do_render(path: &str, opts: &Options) {
    let bar = load_tab_bar(opts.config.as_deref());
    let views = load_views(read_json(path)).unwrap_or_else(|e| {
        eprintln!("view-tabs: {} does not hold views: {}", path, e);
        process::exit(1);
    });

    let mut tabs = Vec::with_capacity(views.len());
    for view in &views {
        match bar.tab_data(view) {
            Ok(tab) => tabs.push(tab),
            Err(e) => {
                eprintln!("view-tabs: cannot render {}: {}", view.display_name(), e);
                process::exit(1);
            }
        }
    }

    if opts.json {
        let output: Vec<TabOutput> = views
            .iter()
            .zip(&tabs)
            .map(|(view, tab)| TabOutput {
                view: view.display_name(),
                tab,
            })
            .collect();
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("view-tabs: failed to serialize tabs: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let active_idx = opts
        .active
        .as_deref()
        .and_then(|name| views.iter().position(|v| v.display_name() == name))
        .unwrap_or(0);

    let parts = tabs
        .iter()
        .enumerate()
        .map(|(idx, tab)| render_tab(idx, idx == active_idx, tab))
        .collect();

    let line: String = build_tab_line(parts, active_idx, line_width(opts))
        .iter()
        .map(|p| p.part.as_str())
        .collect();
    println!("{}", line);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_help();
        process::exit(1);
    }
    if args[0] == "--help" || args[0] == "-h" {
        print_help();
        return;
    }

    let opts = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("view-tabs: {}", e);
        eprintln!("Run with --help for usage");
        process::exit(1);
    });
    log::debug!("options: {:?}", opts);

    if let Some(field) = opts.colours {
        do_colours(field, &opts);
    } else if let Some(path) = &opts.input {
        do_render(path, &opts);
    }
}
