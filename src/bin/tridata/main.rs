//! tridata CLI - inspect Triangle mesh file families.
//!
//! Usage: tridata <COMMAND> [OPTIONS] <DIR> <NAME>...
//!
//! Run `tridata --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tridata::io::{self, EdgeLinePolicy, LoadOptions};
use tridata::mesh::MeshData;
use tridata::nalgebra::{DMatrix, Scalar};

#[derive(Parser)]
#[command(name = "tridata")]
#[command(author, version, about = "Triangle mesh file decoder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a summary of one or more datasets
    Info {
        /// Directory containing the mesh files
        directory: PathBuf,

        /// Base names of the datasets (e.g. `A` for A.node, A.ele, ...)
        #[arg(required = true)]
        names: Vec<String>,

        /// Use single-threaded loading
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Print the decoded arrays of a dataset
    Show {
        /// Directory containing the mesh files
        directory: PathBuf,

        /// Base name of the dataset
        name: String,

        /// Only print this field
        #[arg(short, long, value_enum)]
        field: Option<Field>,

        #[command(flatten)]
        decode: DecodeArgs,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Drop edge file lines that are neither edges nor rays
    #[arg(long)]
    skip_unclassified_edges: bool,

    /// Ignore tokens after the last section of a file
    #[arg(long)]
    allow_trailing_tokens: bool,
}

impl DecodeArgs {
    fn options(&self) -> LoadOptions {
        let policy = if self.skip_unclassified_edges {
            EdgeLinePolicy::Skip
        } else {
            EdgeLinePolicy::Reject
        };
        LoadOptions::default()
            .with_unclassified_edges(policy)
            .with_trailing_tokens(self.allow_trailing_tokens)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
enum Field {
    Vertices,
    VertexAttributes,
    VertexMarkers,
    Triangles,
    TriangleAttributes,
    Segments,
    SegmentMarkers,
    Holes,
    TriangleMaxArea,
    Edges,
    EdgeMarkers,
    RayOrigins,
    RayDirections,
    RayMarkers,
    Regions,
    TriangleNeighbors,
}

impl Field {
    fn key(self) -> &'static str {
        match self {
            Field::Vertices => "vertices",
            Field::VertexAttributes => "vertex_attributes",
            Field::VertexMarkers => "vertex_markers",
            Field::Triangles => "triangles",
            Field::TriangleAttributes => "triangle_attributes",
            Field::Segments => "segments",
            Field::SegmentMarkers => "segment_markers",
            Field::Holes => "holes",
            Field::TriangleMaxArea => "triangle_max_area",
            Field::Edges => "edges",
            Field::EdgeMarkers => "edge_markers",
            Field::RayOrigins => "ray_origins",
            Field::RayDirections => "ray_directions",
            Field::RayMarkers => "ray_markers",
            Field::Regions => "regions",
            Field::TriangleNeighbors => "triangle_neighbors",
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info {
            directory,
            names,
            sequential,
            decode,
        } => {
            let options = decode.options().with_parallel(!sequential);
            cmd_info(&directory, &names, &options)?;
        }

        Commands::Show {
            directory,
            name,
            field,
            decode,
        } => {
            cmd_show(&directory, &name, field, &decode.options())?;
        }
    }

    Ok(())
}

fn cmd_info(directory: &Path, names: &[String], options: &LoadOptions) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let results = io::load_all(directory, names, options);
    let elapsed = start.elapsed();

    let mut failures = 0;
    for (name, result) in names.iter().zip(results) {
        match result {
            Ok(data) => print_summary(directory, name, &data),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", name, e);
            }
        }
    }

    let mode = if options.parallel { "parallel" } else { "sequential" };
    println!("Loaded {} of {} datasets ({:.2?}, {})", names.len() - failures, names.len(), elapsed, mode);

    if failures > 0 {
        return Err(format!("{} datasets failed to load", failures).into());
    }
    Ok(())
}

fn print_summary(directory: &Path, name: &str, data: &MeshData) {
    println!("Dataset: {}", directory.join(name).display());
    match data.index_base {
        Some(base) => println!("Index base: {}", base),
        None => println!("Index base: unknown (no vertices)"),
    }
    println!("Vertices: {}", data.num_vertices());
    println!("Triangles: {}", data.num_triangles());

    if let Some(segments) = &data.segments {
        println!("Segments: {}", segments.len());
    }
    if let Some(holes) = &data.holes {
        println!("Holes: {}", holes.len());
    }
    if let Some(regions) = &data.regions {
        println!("Regions: {}", regions.len());
    }
    if let Some(edges) = &data.edges {
        println!("Edges: {}", edges.len());
    }
    if let Some(rays) = &data.ray_origins {
        println!("Rays: {}", rays.len());
    }

    if let Some((min, max)) = data.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}) to ({:.3}, {:.3})",
            min.x, min.y, max.x, max.y
        );
    }

    println!("Fields: {}", data.keys().join(", "));
    println!();
}

fn cmd_show(
    directory: &Path,
    name: &str,
    field: Option<Field>,
    options: &LoadOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = io::load_with_options(directory, name, options)?;

    let wanted = |key: &str| field.map_or(true, |f| f.key() == key);
    if let Some(field) = field {
        if !data.contains(field.key()) {
            return Err(format!("{} has no {} field", name, field.key()).into());
        }
    }

    if wanted("vertices") {
        if let Some(vertices) = &data.vertices {
            print_rows("vertices", vertices.iter().map(|v| format!("{} {}", v.x, v.y)));
        }
    }
    if wanted("vertex_attributes") {
        print_matrix("vertex_attributes", data.vertex_attributes.as_ref());
    }
    if wanted("vertex_markers") {
        print_matrix("vertex_markers", data.vertex_markers.as_ref());
    }
    if wanted("triangles") {
        print_matrix("triangles", data.triangles.as_ref());
    }
    if wanted("triangle_attributes") {
        print_matrix("triangle_attributes", data.triangle_attributes.as_ref());
    }
    if wanted("segments") {
        if let Some(segments) = &data.segments {
            print_rows("segments", segments.iter().map(|s| format!("{} {}", s[0], s[1])));
        }
    }
    if wanted("segment_markers") {
        print_matrix("segment_markers", data.segment_markers.as_ref());
    }
    if wanted("holes") {
        if let Some(holes) = &data.holes {
            print_rows("holes", holes.iter().map(|h| format!("{} {}", h.x, h.y)));
        }
    }
    if wanted("triangle_max_area") {
        if let Some(areas) = &data.triangle_max_area {
            print_rows("triangle_max_area", areas.iter().map(|a| a.to_string()));
        }
    }
    if wanted("edges") {
        if let Some(edges) = &data.edges {
            print_rows("edges", edges.iter().map(|e| format!("{} {}", e[0], e[1])));
        }
    }
    if wanted("edge_markers") {
        print_matrix("edge_markers", data.edge_markers.as_ref());
    }
    if wanted("ray_origins") {
        if let Some(origins) = &data.ray_origins {
            print_rows("ray_origins", origins.iter().map(|o| o.to_string()));
        }
    }
    if wanted("ray_directions") {
        if let Some(directions) = &data.ray_directions {
            print_rows("ray_directions", directions.iter().map(|d| format!("{} {}", d.x, d.y)));
        }
    }
    if wanted("ray_markers") {
        print_matrix("ray_markers", data.ray_markers.as_ref());
    }
    if wanted("regions") {
        if let Some(regions) = &data.regions {
            print_rows(
                "regions",
                regions.iter().map(|r| {
                    let [x, y, z, a] = r.to_array();
                    format!("{} {} {} {}", x, y, z, a)
                }),
            );
        }
    }
    if wanted("triangle_neighbors") {
        print_matrix("triangle_neighbors", data.triangle_neighbors.as_ref());
    }

    Ok(())
}

fn print_rows(key: &str, rows: impl ExactSizeIterator<Item = String>) {
    println!("{} ({}):", key, rows.len());
    for row in rows {
        println!("  {}", row);
    }
}

fn print_matrix<T: Scalar + std::fmt::Display>(key: &str, matrix: Option<&DMatrix<T>>) {
    let Some(matrix) = matrix else {
        return;
    };
    println!("{} ({} x {}):", key, matrix.nrows(), matrix.ncols());
    for row in matrix.row_iter() {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("  {}", fields.join(" "));
    }
}
