use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use vanim::scene::model::format_number;
use vanim::{
    Document, Ease, EmitMode, Keyframe, KeyframeValue, Node, NodeKind, NodeType, Particle,
    ROOT_ID, TrackKey, format_diagnostics, has_errors, parse_and_validate, validate_document,
};

#[derive(Parser, Debug)]
#[command(name = "vanim", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create `<name>.vanim` from the empty template.
    Create(CreateArgs),
    /// Validate a document and print its diagnostics.
    Validate(FileArgs),
    /// Print document metadata.
    Info(FileArgs),
    /// Print the node tree and particle emitters.
    ListNodes(FileArgs),
    /// Add a node from its template.
    AddNode(AddNodeArgs),
    /// Add a keyframe to a node track.
    AddKeyframe(AddKeyframeArgs),
    /// Add a particle emitter.
    AddParticle(AddParticleArgs),
    /// Copy nodes, particles, assets and params missing from `base` out of `overlay`.
    Merge(MergeArgs),
}

#[derive(Parser, Debug)]
struct CreateArgs {
    name: String,

    /// Directory to create the file in.
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

#[derive(Parser, Debug)]
struct FileArgs {
    file: PathBuf,
}

#[derive(Parser, Debug)]
struct AddNodeArgs {
    file: PathBuf,

    #[arg(long = "type", value_parser = parse_node_type, default_value = "container")]
    node_type: NodeType,

    /// Node id; defaults to `<type>-<node count>`.
    #[arg(long)]
    id: Option<String>,

    #[arg(long, default_value = ROOT_ID)]
    parent: String,

    #[arg(long)]
    asset: Option<String>,

    /// Text content for text nodes.
    #[arg(long)]
    text: Option<String>,

    #[arg(long)]
    x: Option<f64>,

    #[arg(long)]
    y: Option<f64>,

    #[arg(long)]
    start_time: Option<f64>,

    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Parser, Debug)]
struct AddKeyframeArgs {
    file: PathBuf,

    #[arg(long)]
    node: String,

    /// Track name, e.g. `x`, `alpha` or `vertex3_y`.
    #[arg(long)]
    prop: String,

    #[arg(long)]
    time: f64,

    /// Numbers interpolate; anything else is stored as a string.
    #[arg(long, allow_hyphen_values = true)]
    value: String,

    #[arg(long)]
    easing: Option<String>,
}

#[derive(Parser, Debug)]
struct AddParticleArgs {
    file: PathBuf,

    /// Emitter id; defaults to `particle-<n>`.
    #[arg(long)]
    id: Option<String>,

    #[arg(long, value_parser = parse_emit_mode, default_value = "burst")]
    mode: EmitMode,

    /// Defaults to the horizontal centre of the canvas.
    #[arg(long)]
    x: Option<f64>,

    #[arg(long)]
    y: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    start_time: f64,

    #[arg(long)]
    count: Option<u32>,

    #[arg(long)]
    lifetime: Option<f64>,

    #[arg(long)]
    color: Option<String>,

    /// Emission window; only used by continuous emitters.
    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Parser, Debug)]
struct MergeArgs {
    base: PathBuf,
    overlay: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => std::process::exit(1),
            }
        }
    };
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Create(args) => cmd_create(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Info(args) => cmd_info(args),
        Command::ListNodes(args) => cmd_list_nodes(args),
        Command::AddNode(args) => cmd_add_node(args),
        Command::AddKeyframe(args) => cmd_add_keyframe(args),
        Command::AddParticle(args) => cmd_add_particle(args),
        Command::Merge(args) => cmd_merge(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_node_type(s: &str) -> Result<NodeType, String> {
    NodeType::lookup(s).ok_or_else(|| {
        let allowed: Vec<&str> = NodeType::ALL.iter().map(|t| t.name()).collect();
        format!("unknown node type \"{s}\"; allowed: {}", allowed.join(", "))
    })
}

fn parse_emit_mode(s: &str) -> Result<EmitMode, String> {
    match s {
        "burst" => Ok(EmitMode::Burst),
        "continuous" => Ok(EmitMode::Continuous),
        _ => Err(format!("unknown mode \"{s}\"; allowed: burst, continuous")),
    }
}

fn load(path: &Path) -> anyhow::Result<Document> {
    Document::from_path(path).with_context(|| format!("load '{}'", path.display()))
}

/// Save `doc` unless the edit left it with error-severity diagnostics.
fn store(path: &Path, doc: &Document) -> anyhow::Result<()> {
    let diags = validate_document(doc);
    if has_errors(&diags) {
        eprintln!("{}", format_diagnostics(&diags));
        anyhow::bail!("edit would make '{}' invalid; not saved", path.display());
    }
    for d in &diags {
        tracing::warn!(path = %d.path, "{}", d.message);
    }
    doc.save(path)?;
    Ok(())
}

fn cmd_create(args: CreateArgs) -> anyhow::Result<()> {
    let path = args.dir.join(format!("{}.vanim", args.name));
    if path.exists() {
        anyhow::bail!("'{}' already exists", path.display());
    }
    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("create directory '{}'", args.dir.display()))?;

    let doc = Document::new(&args.name);
    doc.save(&path)?;
    println!("created {}", path.display());
    println!(
        "  name: {}, duration: {}ms, {}x{}",
        doc.name,
        format_number(doc.duration),
        format_number(doc.width),
        format_number(doc.height)
    );
    Ok(())
}

fn cmd_validate(args: FileArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read '{}'", args.file.display()))?;
    let diags = match parse_and_validate(&json) {
        Ok((_, warnings)) => warnings,
        Err(errors) => errors,
    };
    println!("{}", format_diagnostics(&diags));
    if has_errors(&diags) {
        let n = diags.iter().filter(|d| d.is_error()).count();
        anyhow::bail!("{n} error(s) in '{}'", args.file.display());
    }
    Ok(())
}

fn cmd_info(args: FileArgs) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let params = if doc.params.is_empty() {
        "(none)".to_owned()
    } else {
        doc.params.keys().cloned().collect::<Vec<_>>().join(", ")
    };
    println!("name: {}", doc.name);
    println!("duration: {}ms", format_number(doc.duration));
    println!(
        "size: {}x{}",
        format_number(doc.width),
        format_number(doc.height)
    );
    println!("nodes: {}", doc.nodes.len());
    println!("particles: {}", doc.particles.len());
    println!("assets: {}", doc.assets.len());
    println!("params: {params}");
    println!("keyframes: {}", doc.keyframe_count());
    Ok(())
}

fn cmd_list_nodes(args: FileArgs) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let referenced: BTreeSet<&str> = doc
        .nodes
        .iter()
        .flat_map(|n| n.children().iter().map(String::as_str))
        .collect();

    let mut printed = BTreeSet::new();
    for node in &doc.nodes {
        if !referenced.contains(node.id.as_str()) {
            print_tree(&doc, &node.id, 0, &mut printed);
        }
    }

    if !doc.particles.is_empty() {
        println!("\nParticles:");
        for p in &doc.particles {
            let mode = match p.mode {
                EmitMode::Burst => "burst",
                EmitMode::Continuous => "continuous",
            };
            println!(
                "  {} ({mode}) @{}ms [{},{}]",
                p.id,
                format_number(p.start_time),
                format_number(p.x),
                format_number(p.y)
            );
        }
    }
    Ok(())
}

fn print_tree<'a>(doc: &'a Document, id: &'a str, depth: usize, printed: &mut BTreeSet<&'a str>) {
    let Some(node) = doc.node(id) else {
        return;
    };
    if !printed.insert(id) {
        return;
    }
    let mut line = format!("{}{} ({})", "  ".repeat(depth), node.id, node.node_type().name());
    if !node.keyframes.is_empty() {
        line.push_str(&format!(" [{} tracks]", node.keyframes.len()));
    }
    if let Some(t) = node.start_time {
        line.push_str(&format!(" @{}ms", format_number(t)));
    }
    println!("{line}");
    for child in node.children() {
        print_tree(doc, child, depth + 1, printed);
    }
}

fn cmd_add_node(args: AddNodeArgs) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let id = args
        .id
        .unwrap_or_else(|| format!("{}-{}", args.node_type.name(), doc.nodes.len()));

    let mut node = Node::template(args.node_type, &id, args.asset.as_deref());
    if let (NodeKind::Text { text, .. }, Some(t)) = (&mut node.kind, args.text) {
        *text = t;
    }
    if args.x.is_some() {
        node.transform.x = args.x;
    }
    if args.y.is_some() {
        node.transform.y = args.y;
    }
    node.start_time = args.start_time;
    node.duration = args.duration;

    let doc = doc.with_node(node, Some(args.parent.as_str()))?;
    store(&args.file, &doc)?;
    println!(
        "added node {id} ({}) -> parent: {}",
        args.node_type.name(),
        args.parent
    );
    Ok(())
}

fn cmd_add_keyframe(args: AddKeyframeArgs) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let value = match args.value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => KeyframeValue::Number(n),
        _ => KeyframeValue::Text(args.value.clone()),
    };
    let mut kf = Keyframe::new(args.time, value.clone());
    if let Some(name) = &args.easing {
        let ease = Ease::lookup(name).with_context(|| format!("unknown easing \"{name}\""))?;
        kf = kf.eased(ease);
    }

    let doc = doc.with_keyframe(&args.node, TrackKey::parse(&args.prop), kf)?;
    store(&args.file, &doc)?;

    let shown = match &value {
        KeyframeValue::Number(n) => format_number(*n),
        KeyframeValue::Text(s) => s.clone(),
    };
    let easing = args
        .easing
        .map(|e| format!(" ({e})"))
        .unwrap_or_default();
    println!(
        "keyframe: {}.{} @ {}ms = {shown}{easing}",
        args.node,
        args.prop,
        format_number(args.time)
    );
    Ok(())
}

fn cmd_add_particle(args: AddParticleArgs) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let id = args
        .id
        .unwrap_or_else(|| format!("particle-{}", doc.particles.len() + 1));
    let x = args.x.unwrap_or(doc.width / 2.0);
    let y = args.y.unwrap_or(doc.height / 2.0);

    let mut particle = Particle::template(&id, x, y);
    particle.mode = args.mode;
    particle.start_time = args.start_time;
    if let Some(count) = args.count {
        particle.config.count = count;
    }
    if let Some(lifetime) = args.lifetime {
        particle.config.lifetime = lifetime;
    }
    if let Some(color) = args.color {
        particle.config.color = color;
    }
    if args.mode == EmitMode::Continuous {
        particle.duration = args.duration;
    }

    let doc = doc.with_particle(particle)?;
    store(&args.file, &doc)?;
    println!(
        "added particle {id} [{},{}]",
        format_number(x),
        format_number(y)
    );
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let base = load(&args.base)?;
    let overlay = load(&args.overlay)?;
    let merged = base.merged(&overlay);
    store(&args.base, &merged)?;
    println!(
        "merged {} -> {}",
        args.overlay.display(),
        args.base.display()
    );
    println!(
        "  nodes: {}, particles: {}",
        merged.nodes.len(),
        merged.particles.len()
    );
    Ok(())
}
