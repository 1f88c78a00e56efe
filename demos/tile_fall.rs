use arcadia::*;
use glam::Vec2;

fn main() -> Result<()> {
    // 20x15 cells of 16px: a floor, a ledge and a one-way platform.
    let mut layer = TileLayer::new(16.0, 16.0, 20, 15);
    let solid = layer.add_tile(Tile::solid());
    let one_way = layer.add_tile(Tile::with_faces(Faces::UP));
    for col in 0..20 {
        layer.set_tile(col, 14, solid);
    }
    for col in 4..8 {
        layer.set_tile(col, 10, solid);
    }
    for col in 12..16 {
        layer.set_tile(col, 8, one_way);
    }

    let mut world = World::new(WorldConfig {
        bounds: Rect::new(0.0, 0.0, layer.width_in_pixels(), layer.height_in_pixels()),
        ..Default::default()
    })?;
    let crates = world.create_group(8);
    for i in 0..8 {
        let mut e = Entity::new(16.0 + i as f32 * 36.0, 0.0, 10.0, 10.0);
        e.acceleration = Vec2::new(0.0, 400.0);
        e.elasticity = 0.3;
        world.spawn_in(crates, e)?;
    }

    let mut landings = 0usize;
    for frame in 0..240 {
        world.step(1.0 / 60.0);
        let mut on_hit = |_: &mut World, _: EntityId, hits: &[TileBlock]| landings += hits.len();
        let touched = layer.collide(&mut world, crates.into(), Some(&mut on_hit))?;
        world.collide(crates.into(), None, None)?;
        if frame % 60 == 0 {
            println!("frame {frame}: tile overlap={touched}");
        }
    }

    world.for_each_alive(crates, false, |w, m| {
        if let Member::Entity(id) = m
            && let Ok(e) = w.entity(id)
        {
            println!("{id:?} rests at bottom={:.1} touching={:?}", e.bottom(), e.touching);
        }
    })?;
    println!("tile hits: {landings}");
    Ok(())
}
