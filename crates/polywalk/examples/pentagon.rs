//! Walk the pentagon `A x <= b` from the plotting scripts and print its vertices.
//!
//! Usage:
//!   cargo run -p polywalk --example pentagon
//!   cargo run -p polywalk --example pentagon -- boxed
//!
//! `boxed` appends the clipping box [0, 3] x [0, 3] first. Its sides only
//! repeat or loosen existing edges, so the walk goes round more than once and
//! `vertices()` cuts it at the first return to the start.

use polywalk::prelude::*;

fn main() {
    let normals = [[0.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [1.0, 1.0]];
    let offsets = [0.0, 2.0, 1.0, 0.0, 2.5];
    let mut hs: Vec<Hs2> = normals
        .iter()
        .zip(offsets)
        .map(|(a, b)| Hs2::from_row(*a, b))
        .collect();
    if std::env::args().nth(1).as_deref() == Some("boxed") {
        hs = BoundingBox::new(0.0, 3.0, 0.0, 3.0).append_to(&hs);
    }
    match find_vertices(&hs) {
        Ok(poly) => {
            for (k, v) in poly.vertices().iter().enumerate() {
                println!("v{k}: ({:.3}, {:.3})", v.x, v.y);
            }
            println!("area = {:.3}", poly.signed_area());
        }
        Err(e) => eprintln!("walk failed: {e}"),
    }
}
