use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use vantage::camera::{camera_transform, Camera};
use vantage::geometry::bonded_pairs;
use vantage::structure::AtomRecord;
use vantage::{Options, Scene, Structure};

fn record(res_num: usize, name: &str, pos: Vec3) -> AtomRecord {
    AtomRecord {
        position: pos,
        chain: "A".to_owned(),
        res_num: res_num.to_string(),
        res_type: "ALA".to_owned(),
        name: name.to_owned(),
        element: String::new(),
        alt: String::new(),
    }
}

/// A helical peptide with `n` residues of N, CA, C, O, CB.
fn helix(n: usize) -> Vec<AtomRecord> {
    (0..n)
        .flat_map(|k| {
            let angle = k as f32 * 100f32.to_radians();
            let ca = Vec3::new(2.3 * angle.cos(), 2.3 * angle.sin(), 1.5 * k as f32);
            let out = Vec3::new(angle.cos(), angle.sin(), 0.0);
            vec![
                record(k + 1, "N", ca + Vec3::new(0.0, 0.0, -1.0) + out * 0.4),
                record(k + 1, "CA", ca),
                record(k + 1, "C", ca + Vec3::new(0.0, 0.0, 1.0) + out * 0.4),
                record(k + 1, "O", ca + Vec3::new(0.0, 0.0, 1.2) + out * 1.5),
                record(k + 1, "CB", ca + out * 1.5),
            ]
        })
        .collect()
}

fn structure_benchmark(c: &mut Criterion) {
    let options = Options::default();
    let mut group = c.benchmark_group("structure_build");
    for n in [100, 1000, 5000] {
        let records = helix(n);
        group.bench_function(format!("{n}_residues"), |b| {
            b.iter(|| {
                black_box(
                    Structure::from_records("bench", records.clone(), &options),
                )
            });
        });
    }
    group.finish();

    let structure =
        Structure::from_records("bench", helix(5000), &options).ok();
    if let Some(structure) = structure {
        c.bench_function("bonded_pairs_25000_atoms", |b| {
            b.iter(|| {
                black_box(bonded_pairs(structure.atoms(), &options.structure))
            });
        });
    }
}

fn camera_benchmark(c: &mut Criterion) {
    let reference = Camera::default();
    let moving = Camera::default().transformed(
        &glam::Affine3A::from_rotation_translation(
            Quat::from_euler(glam::EulerRot::XYZ, 0.4, -1.2, 2.5),
            Vec3::new(3.0, -4.0, 12.0),
        ),
    );
    c.bench_function("camera_transform", |b| {
        b.iter(|| black_box(camera_transform(&reference, &moving, 25.0)));
    });

    let options = Options::default();
    let Ok(structure) = Structure::from_records("bench", helix(1000), &options)
    else {
        return;
    };
    let scene = Scene::new(structure, options);
    let target_atom = scene.structure().residues()[500].representative();
    c.bench_function("animate_to_atom_1000_residues", |b| {
        b.iter(|| {
            let mut scene = scene.clone();
            let _ = scene.set_target_view_by_atom(target_atom);
            while scene.is_animating() {
                let _ = scene.tick();
            }
            black_box(scene.current_view().i_atom)
        });
    });
}

criterion_group!(benches, structure_benchmark, camera_benchmark);
criterion_main!(benches);
