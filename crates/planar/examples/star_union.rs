//! Merge two random stars and print the outline.
//!
//! Usage:
//!   cargo run -p planar --example star_union -- [seed]
//!
//! Prints operand and result areas followed by the result's vertices.

use planar::prelude::*;

fn main() {
    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025);
    let cfg = StarCfg {
        vertex_count: VertexCount::Uniform { min: 6, max: 14 },
        ..StarCfg::default()
    };
    let a = draw_star(cfg, ReplayToken { seed, index: 0 });
    let mut b = draw_star(cfg, ReplayToken { seed, index: 1 });
    b.set_position(Vec2::new(4.0, 2.0));

    println!("a: {} vertices, area {:.3}", a.vertices().len(), a.area());
    println!("b: {} vertices, area {:.3}", b.vertices().len(), b.area());
    for op in BooleanOp::ALL {
        match BooleanOperation::new(&a, &b, op).result() {
            Ok(p) => {
                println!("{op}: {} vertices, area {:.3}", p.vertices().len(), p.area());
                for v in p.vertices() {
                    println!("  ({:.4}, {:.4})", v.x, v.y);
                }
            }
            Err(e) => println!("{op}: {e}"),
        }
    }
}
