//! This is the command line tool that loads RVSDG '.xml' files, lays out a
//! region, and saves the rendered output.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use rvsdg::backends::svg::SVGWriter;
use rvsdg::core::color::COLOR_NAMES;
use rvsdg::core::config::LayoutConfig;
use rvsdg::core::utils::save_to_file;
use rvsdg::model::ElementHandle;
use rvsdg::viewer::Viewer;
use std::fs;
use std::process;

struct CLIOptions {
    input_path: String,
    output_path: String,
    region: Option<String>,
    expand: Vec<String>,
    expand_all: bool,
    color: Vec<String>,
    list: bool,
    debug_mode: bool,
}

impl CLIOptions {
    pub fn new() -> Self {
        Self {
            input_path: String::new(),
            output_path: String::new(),
            region: None,
            expand: Vec::new(),
            expand_all: false,
            color: Vec::new(),
            list: false,
            debug_mode: false,
        }
    }
}

fn lookup(viewer: &Viewer, id: &str) -> Result<ElementHandle, String> {
    viewer
        .element_by_id(id)
        .ok_or_else(|| format!("No element with the id '{}'", id))
}

/// Print the compound elements of the document, like the tree panel of a
/// graphical viewer would.
fn print_outline(viewer: &Viewer) {
    for entry in viewer.model().outline() {
        println!("{}{} {}", "  ".repeat(entry.depth), entry.type_name, entry.id);
    }
}

fn run(options: CLIOptions) -> Result<(), String> {
    let contents = fs::read_to_string(&options.input_path)
        .map_err(|err| format!("Can't open the file {}: {}", options.input_path, err))?;

    let mut viewer = Viewer::from_xml(&contents, LayoutConfig::default())
        .map_err(|err| format!("Can't load {}: {}", options.input_path, err))?;

    if options.list {
        print_outline(&viewer);
        return Ok(());
    }

    let region = match &options.region {
        Some(id) => lookup(&viewer, id)?,
        None => viewer.model().root(),
    };

    let to_expand: Vec<ElementHandle> = if options.expand_all {
        let model = viewer.model();
        model
            .descendants(model.root())
            .into_iter()
            .filter(|h| model.is_expandable(*h))
            .collect()
    } else {
        let mut handles = Vec::new();
        for id in options.expand.iter() {
            handles.push(lookup(&viewer, id)?);
        }
        handles
    };
    for node in to_expand {
        if !viewer.model().is_expanded(node) {
            viewer.toggle_expansion(node).map_err(|err| err.to_string())?;
        }
    }

    for id in options.color.iter() {
        let vertex = lookup(&viewer, id)?;
        let color = viewer.color_edges_of(vertex);
        log::info!("Colored the edges of '{}' {}.", id, COLOR_NAMES[color]);
    }

    viewer.layout_region(region).map_err(|err| err.to_string())?;

    let mut svg = SVGWriter::new();
    viewer.render(&mut svg, options.debug_mode);
    let content = svg.finalize();

    save_to_file(&options.output_path, &content)
        .map_err(|err| format!("Could not write the file {}: {}", options.output_path, err))?;
    log::info!("Wrote {}", options.output_path);
    Ok(())
}

fn main() {
    let matches = Command::new("rvsdg-viewer")
        .version("0.1")
        .about("Renders RVSDG graphs to SVG")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Draw the bounding boxes of the shapes"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Print the outline of the document and exit"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .default_value("/tmp/out.svg")
                .help("Path of the output file"),
        )
        .arg(
            Arg::new("region")
                .short('r')
                .long("region")
                .value_name("REGION_ID")
                .help("The region to draw (default: the whole document)"),
        )
        .arg(
            Arg::new("expand")
                .short('e')
                .long("expand")
                .value_name("NODE_ID")
                .action(ArgAction::Append)
                .help("Expand a compound node"),
        )
        .arg(
            Arg::new("expand-all")
                .long("expand-all")
                .action(ArgAction::SetTrue)
                .help("Expand every compound node"),
        )
        .arg(
            Arg::new("color")
                .short('c')
                .long("color")
                .value_name("VERTEX_ID")
                .action(ArgAction::Append)
                .help("Color the edges that touch a vertex"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let strings = |name: &str| -> Vec<String> {
        matches
            .get_many::<String>(name)
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default()
    };

    let mut cli = CLIOptions::new();
    cli.debug_mode = matches.get_flag("debug");
    cli.list = matches.get_flag("list");
    cli.expand_all = matches.get_flag("expand-all");
    cli.expand = strings("expand");
    cli.color = strings("color");
    cli.region = matches.get_one::<String>("region").cloned();
    cli.output_path = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| "/tmp/out.svg".to_string());
    cli.input_path = matches
        .get_one::<String>("INPUT")
        .cloned()
        .unwrap_or_default();

    if let Err(err) = run(cli) {
        log::error!("{}", err);
        process::exit(1);
    }
}
