use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planar::geom2::{sort_by_distance, BooleanOp, BooleanOperation, Ray};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::fmt::SubscriberBuilder;

mod polyfile;

use polyfile::{load_polygon, write_json, BooleanReport, Crossing};

#[derive(Parser)]
#[command(name = "planar")]
#[command(about = "Polygon queries and boolean operations on JSON polygon files")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Combine two polygons and write the result as JSON
    Boolean {
        #[arg(long)]
        subject: PathBuf,
        #[arg(long)]
        mask: PathBuf,
        /// union, intersect, difference or xor
        #[arg(long, value_parser = BooleanOp::from_str, default_value_t = BooleanOp::Union)]
        op: BooleanOp,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print whether a point lies inside a polygon
    Contains {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Cast a ray against a polygon and print the crossings, nearest first
    Raycast {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        angle: f64,
        /// Segment length; open ray when omitted
        #[arg(long)]
        length: Option<f64>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Boolean {
            subject,
            mask,
            op,
            out,
        } => {
            let report = boolean(&subject, &mask, op, &out)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Action::Contains { polygon, x, y } => {
            let inside = contains(&polygon, x, y)?;
            println!("{}", serde_json::json!({ "inside": inside }));
        }
        Action::Raycast {
            polygon,
            x,
            y,
            angle,
            length,
        } => {
            let hits = raycast(&polygon, x, y, angle, length)?;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
    }
    Ok(())
}

fn boolean(subject: &Path, mask: &Path, op: BooleanOp, out: &Path) -> Result<BooleanReport> {
    tracing::info!(subject = %subject.display(), mask = %mask.display(), %op, out = %out.display(), "boolean");
    let a = load_polygon(subject)?;
    let b = load_polygon(mask)?;
    let result = BooleanOperation::new(&a, &b, op)
        .result()
        .with_context(|| format!("{op} of {} and {}", subject.display(), mask.display()))?;
    let report = BooleanReport::new(op.to_string(), &result);
    tracing::info!(vertices = report.vertices.len(), area = report.area, "boolean_result");
    write_json(out, &report)?;
    Ok(report)
}

fn contains(polygon: &Path, x: f64, y: f64) -> Result<bool> {
    tracing::info!(polygon = %polygon.display(), x, y, "contains");
    let p = load_polygon(polygon)?;
    Ok(p.contains_point(planar::Vec2::new(x, y)))
}

fn raycast(
    polygon: &Path,
    x: f64,
    y: f64,
    angle: f64,
    length: Option<f64>,
) -> Result<Vec<Crossing>> {
    tracing::info!(polygon = %polygon.display(), x, y, angle, length = ?length, "raycast");
    let p = load_polygon(polygon)?;
    let origin = planar::Vec2::new(x, y);
    let ray = match length {
        Some(l) => Ray::new(origin, angle, l),
        None => Ray::open(origin, angle),
    };
    let mut hits = ray.polygon_intersections(&p);
    sort_by_distance(&mut hits, origin);
    Ok(hits
        .iter()
        .map(|c| Crossing {
            point: [c.point.x, c.point.y],
            edge: c.edge_index,
            distance: c.distance_from_cast_origin(),
        })
        .collect())
}
