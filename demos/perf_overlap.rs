use arcadia::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<()> {
    let n = 20_000usize;
    for divisions in [2u32, 6, 16] {
        let mut world = World::new(WorldConfig {
            bounds: Rect::new(0.0, 0.0, 4096.0, 4096.0),
            divisions,
            enable_timing: true,
            ..Default::default()
        })?;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..n {
            let x = rng.gen_range(0.0..4080.0);
            let y = rng.gen_range(0.0..4080.0);
            let v = Vec2::new(rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0));
            world.spawn(Entity::new(x, y, 8.0, 8.0).with_velocity(v));
        }

        world.step(1.0 / 60.0);
        let root = world.root().into();
        world.collide(root, None, None)?;

        let s = world.last_overlap_stats();
        match world.timing() {
            Some(t) => println!(
                "N={n} divisions={divisions} build={:.3}ms execute={:.3}ms nodes={} candidates={} unique={} overlaps={}",
                t.build_ms, t.execute_ms, s.nodes, s.candidate_pairs, s.unique_pairs, s.overlaps
            ),
            None => println!("N={n} divisions={divisions} {s:?}"),
        }
    }
    Ok(())
}
