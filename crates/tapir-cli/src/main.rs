use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use tapir::{Graph, LayoutOptions, Point};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(tapir::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "layout error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<tapir::Error> for CliError {
    fn from(value: tapir::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Distances,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    spread: Option<f64>,
    extent: Option<f64>,
    iterations: Option<usize>,
    weight_exponent: Option<f64>,
    initial_diameter: Option<f64>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GraphIn {
    #[serde(default)]
    nodes: Vec<NodeIn>,
    #[serde(default)]
    edges: Vec<EdgeIn>,
    #[serde(default)]
    relationships: Vec<RelationshipIn>,
    #[serde(default)]
    options: Option<LayoutOptions>,
}

#[derive(Debug, Deserialize)]
struct NodeIn {
    id: String,
    #[serde(default)]
    pinned: Option<Point>,
}

#[derive(Debug, Deserialize)]
struct EdgeIn {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
}

#[derive(Debug, Deserialize)]
struct RelationshipIn {
    id: String,
    members: Vec<String>,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    positions: Option<&'a BTreeMap<String, Point>>,
}

#[derive(Serialize)]
struct DistancesOut<'a> {
    ids: Vec<&'a str>,
    matrix: Option<Vec<Vec<f64>>>,
}

fn usage() -> &'static str {
    "tapir-cli\n\
\n\
USAGE:\n\
  tapir-cli [layout] [--pretty] [--spread <s>|--extent <e>] [--iterations <n>] [--weight-exp <w>] [--diameter <d>] [--seed <n>] [<path>|-]\n\
  tapir-cli distances [--pretty] [--spread <s>|--extent <e>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the JSON graph is read from stdin.\n\
  - Input: {\"nodes\": [{\"id\", \"pinned\"?}], \"edges\": [{\"source\", \"target\"}], \"relationships\": [{\"id\", \"members\"}], \"options\"?}.\n\
  - Flags override the input's \"options\" object.\n\
  - layout prints {\"positions\": {<id>: {\"x\", \"y\"}}}; positions is null for an empty graph.\n\
  - Set RUST_LOG=tapir=debug for diagnostics on stderr, TAPIR_TIMING=1 for timings.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    fn value<'a, T: std::str::FromStr>(
        it: &mut impl Iterator<Item = &'a String>,
    ) -> Result<T, CliError> {
        let Some(raw) = it.next() else {
            return Err(CliError::Usage(usage()));
        };
        raw.parse::<T>().map_err(|_| CliError::Usage(usage()))
    }

    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "distances" => args.command = Command::Distances,
            "--pretty" => args.pretty = true,
            "--spread" => args.spread = Some(value(&mut it)?),
            "--extent" => args.extent = Some(value(&mut it)?),
            "--iterations" => args.iterations = Some(value(&mut it)?),
            "--weight-exp" => args.weight_exponent = Some(value(&mut it)?),
            "--diameter" => args.initial_diameter = Some(value(&mut it)?),
            "--seed" => args.seed = Some(value(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.spread.is_some() && args.extent.is_some() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn effective_options(input: Option<LayoutOptions>, args: &Args) -> LayoutOptions {
    let mut opts = input.unwrap_or_default();
    if let Some(extent) = args.extent {
        opts.spread = LayoutOptions::for_extent(extent).spread;
    }
    if let Some(spread) = args.spread {
        opts.spread = spread;
    }
    if let Some(iterations) = args.iterations {
        opts.stress.iterations = iterations;
    }
    if let Some(w) = args.weight_exponent {
        opts.stress.weight_exponent = w;
    }
    if let Some(d) = args.initial_diameter {
        opts.stress.initial_diameter = d;
    }
    if let Some(seed) = args.seed {
        opts.stress.random_seed = seed;
    }
    opts
}

fn build_graph(input: GraphIn) -> (Graph, Option<LayoutOptions>) {
    let mut graph = Graph::new();
    for n in input.nodes {
        let node = graph.add_node(n.id);
        node.pinned = n.pinned;
    }
    for (i, e) in input.edges.into_iter().enumerate() {
        let id = e.id.unwrap_or_else(|| format!("e{i}"));
        graph.add_edge(id, e.source, e.target);
    }
    for r in &input.relationships {
        let members: Vec<&str> = r.members.iter().map(String::as_str).collect();
        let added = graph.add_relationship(&r.id, &members);
        if added < members.len() {
            tracing::warn!(
                relationship = %r.id,
                members = members.len(),
                added,
                "relationship references unknown nodes; some hops were skipped"
            );
        }
    }
    (graph, input.options)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let input: GraphIn = serde_json::from_str(&text)?;
    let (graph, input_opts) = build_graph(input);
    let opts = effective_options(input_opts, &args);
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        spread = opts.spread,
        "graph loaded"
    );

    match args.command {
        Command::Layout => {
            let result = tapir::layout(&graph, &opts)?;
            let out = LayoutOut {
                positions: result.as_ref().map(|r| &r.positions),
            };
            write_json(&out, args.pretty)
        }
        Command::Distances => {
            let (src, dst) = graph.edge_index_lists()?;
            let d = tapir::shortest_path_matrix(graph.nodes.len(), &src, &dst, opts.spread)?;
            let out = DistancesOut {
                ids: graph.nodes.iter().map(|n| n.id.as_str()).collect(),
                matrix: d.map(|d| d.rows()),
            };
            write_json(&out, args.pretty)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("tapir-cli")
            .chain(items.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_to_layout_from_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert!(matches!(args.command, Command::Layout));
        assert!(args.input.is_none());
    }

    #[test]
    fn parses_numeric_overrides() {
        let args = parse_args(&argv(&[
            "layout",
            "--spread",
            "12.5",
            "--iterations",
            "20",
            "--seed",
            "7",
            "graph.json",
        ]))
        .unwrap();
        assert_eq!(args.spread, Some(12.5));
        assert_eq!(args.iterations, Some(20));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.input.as_deref(), Some("graph.json"));
    }

    #[test]
    fn rejects_spread_and_extent_together() {
        let err = parse_args(&argv(&["--spread", "1", "--extent", "2"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn rejects_missing_and_malformed_values() {
        assert!(matches!(
            parse_args(&argv(&["--iterations"])).unwrap_err(),
            CliError::Usage(_)
        ));
        assert!(matches!(
            parse_args(&argv(&["--iterations", "many"])).unwrap_err(),
            CliError::Usage(_)
        ));
    }

    #[test]
    fn flags_override_input_options() {
        let input = LayoutOptions {
            spread: 5.0,
            ..Default::default()
        };
        let args = Args {
            extent: Some(4.0),
            iterations: Some(3),
            ..Default::default()
        };
        let opts = effective_options(Some(input), &args);
        assert_eq!(opts.spread, 12.0);
        assert_eq!(opts.stress.iterations, 3);
        assert_eq!(opts.stress.weight_exponent, -2.0);
    }
}
