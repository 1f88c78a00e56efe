use arcadia::*;
use glam::Vec2;

fn main() -> Result<()> {
    let mut world = World::new(WorldConfig {
        bounds: Rect::new(0.0, 0.0, 320.0, 240.0),
        ..Default::default()
    })?;

    let ground = world.create_group(0);
    world.spawn_in(ground, Entity::new(0.0, 200.0, 320.0, 40.0).immovable())?;
    let lift = Entity::new(200.0, 150.0, 48.0, 8.0).immovable().with_velocity(Vec2::new(-20.0, 0.0));
    let lift = world.spawn_in(ground, lift)?;

    let mut hero = Entity::new(210.0, 100.0, 12.0, 16.0);
    hero.acceleration.y = 600.0;
    hero.max_velocity = Vec2::new(200.0, 400.0);
    let hero = world.spawn(hero);

    let mut bumps = 0;
    let dt = 1.0 / 60.0;
    for frame in 0..180 {
        world.step(dt);
        let mut count = |_: &mut World, _: EntityId, _: EntityId| bumps += 1;
        world.collide(hero.into(), Some(ground.into()), Some(&mut count))?;

        let h = world.entity(hero)?;
        if h.just_touched(Faces::FLOOR) {
            println!("frame {frame}: landed at y={:.1}", h.bottom());
        }
        if frame % 60 == 59 {
            let l = world.entity(lift)?;
            println!(
                "frame {frame}: hero=({:.1}, {:.1}) lift.x={:.1} touching={:?}",
                h.x(),
                h.y(),
                l.x(),
                h.touching
            );
        }
    }
    println!("contacts: {bumps}");
    Ok(())
}
