//! Cut doorways and pillars out of a room outline, then triangulate the floor.
//!
//! Usage:
//!   cargo run -p polykit --example level_cut
//!
//! Prints the resulting SVG paths, areas and triangle counts.

use polykit::geom2::{AngledRect, Rect};
use polykit::{Poly, Vect};

fn main() {
    let room: Poly = Poly::from_rect(&Rect::new(0.0, 0.0, 400.0, 300.0));
    let annex: Poly = Poly::from_rect(&Rect::new(400.0, 100.0, 200.0, 100.0));
    let cutters: Vec<Poly> = vec![
        Poly::circle(Vect::new(120.0, 150.0), 20.0, 12),
        Poly::circle(Vect::new(280.0, 150.0), 20.0, 12),
        Poly::from_angled_rect(&AngledRect {
            base_rect: Rect::new(500.0, 120.0, 40.0, 40.0),
            angle: std::f64::consts::FRAC_PI_4,
        }),
    ];

    let floor = match Poly::cut_out_safely(&cutters, &[room, annex]) {
        Ok(polys) => polys,
        Err(err) => {
            eprintln!("cut failed: {err}");
            return;
        }
    };
    for mut p in floor {
        let tris = p.quality_triangulate();
        println!(
            "area={:.1} holes={} triangles={}",
            p.area(),
            p.holes().len(),
            tris.tris.len()
        );
        println!("{}", p.clean_clone(None, None).svg_path());
    }
}
