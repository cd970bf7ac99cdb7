//! The builtin campaign, one level per biome plus a final descent.

use cavern_biome::{BiomeId, Color};
use glam::Vec2;

use crate::definition::{
    EnemyKind, EnemyPlacement, LegacyOverrides, LevelDefinition, PlatformSegment,
};

fn seg(x: f32, y: f32, width: f32) -> PlatformSegment {
    PlatformSegment { x, y, width }
}

fn at(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn enemy(x: f32, y: f32, kind: EnemyKind, velocity: f32) -> EnemyPlacement {
    EnemyPlacement {
        position: Vec2::new(x, y),
        kind,
        velocity,
        tint: None,
    }
}

fn basic(x: f32, y: f32, velocity: f32, tint: u32) -> EnemyPlacement {
    EnemyPlacement {
        position: Vec2::new(x, y),
        kind: EnemyKind::Basic,
        velocity,
        tint: Some(Color(tint)),
    }
}

fn level(name: &str, biome: BiomeId) -> LevelDefinition {
    LevelDefinition {
        name: name.to_string(),
        biome: Some(biome),
        platforms: Vec::new(),
        collectibles: Vec::new(),
        air_capsules: Vec::new(),
        enemies: Vec::new(),
        player_start: Vec2::ZERO,
        exit: Vec2::ZERO,
        legacy: LegacyOverrides::default(),
    }
}

pub(crate) fn levels() -> Vec<LevelDefinition> {
    vec![
        central_cavern(),
        underground_chamber(),
        arctic_zone(),
        mushroom_grotto(),
        molten_core(),
        crystal_caverns(),
        toxic_tunnels(),
        slime_pits(),
        final_descent(),
    ]
}

fn central_cavern() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(100.0, 450.0),
        exit: at(400.0, 250.0),
        platforms: vec![
            seg(0.0, 584.0, 800.0),
            seg(64.0, 120.0, 206.0),
            seg(360.0, 120.0, 376.0),
            seg(160.0, 200.0, 240.0),
            seg(480.0, 200.0, 160.0),
            seg(32.0, 280.0, 160.0),
            seg(352.0, 280.0, 160.0),
            seg(608.0, 280.0, 160.0),
            seg(96.0, 360.0, 160.0),
            seg(416.0, 360.0, 160.0),
            seg(192.0, 440.0, 160.0),
            seg(544.0, 440.0, 160.0),
        ],
        collectibles: vec![
            at(128.0, 100.0),
            at(256.0, 100.0),
            at(384.0, 100.0),
            at(512.0, 100.0),
            at(640.0, 100.0),
            at(200.0, 180.0),
            at(280.0, 180.0),
            at(520.0, 180.0),
            at(600.0, 180.0),
            at(72.0, 260.0),
            at(152.0, 260.0),
            at(392.0, 260.0),
            at(472.0, 260.0),
            at(648.0, 260.0),
            at(136.0, 340.0),
            at(216.0, 340.0),
            at(456.0, 340.0),
            at(536.0, 340.0),
            at(232.0, 420.0),
            at(312.0, 420.0),
        ],
        air_capsules: vec![at(700.0, 260.0), at(270.0, 420.0)],
        enemies: vec![
            enemy(300.0, 550.0, EnemyOne, 80.0),
            enemy(500.0, 260.0, EnemyTwo, -75.0),
            basic(150.0, 340.0, 60.0, 0x8000ff),
            basic(400.0, 420.0, -80.0, 0xff4080),
        ],
        ..level("Central Cavern", BiomeId::Cavern)
    }
}

fn underground_chamber() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(50.0, 520.0),
        exit: at(720.0, 100.0),
        platforms: vec![
            seg(0.0, 584.0, 200.0),
            seg(280.0, 584.0, 160.0),
            seg(520.0, 584.0, 280.0),
            seg(32.0, 520.0, 96.0),
            seg(64.0, 460.0, 96.0),
            seg(96.0, 400.0, 96.0),
            seg(128.0, 340.0, 96.0),
            seg(160.0, 280.0, 96.0),
            seg(300.0, 450.0, 200.0),
            seg(280.0, 320.0, 120.0),
            seg(450.0, 380.0, 120.0),
            seg(380.0, 250.0, 160.0),
            seg(600.0, 500.0, 128.0),
            seg(550.0, 420.0, 96.0),
            seg(650.0, 340.0, 96.0),
            seg(580.0, 260.0, 128.0),
            seg(640.0, 180.0, 128.0),
            seg(200.0, 120.0, 160.0),
            seg(500.0, 120.0, 200.0),
        ],
        collectibles: vec![
            at(100.0, 564.0),
            at(320.0, 564.0),
            at(400.0, 564.0),
            at(600.0, 564.0),
            at(80.0, 500.0),
            at(112.0, 440.0),
            at(144.0, 380.0),
            at(176.0, 320.0),
            at(208.0, 260.0),
            at(350.0, 430.0),
            at(450.0, 430.0),
            at(330.0, 300.0),
            at(500.0, 360.0),
            at(430.0, 230.0),
            at(640.0, 480.0),
            at(590.0, 400.0),
            at(690.0, 320.0),
            at(620.0, 240.0),
            at(680.0, 160.0),
            at(250.0, 100.0),
            at(320.0, 100.0),
            at(550.0, 100.0),
            at(650.0, 100.0),
        ],
        air_capsules: vec![at(240.0, 320.0), at(650.0, 240.0)],
        enemies: vec![
            enemy(350.0, 550.0, EnemyOne, -100.0),
            enemy(450.0, 230.0, EnemyTwo, 90.0),
            basic(80.0, 320.0, 70.0, 0xff8000),
            basic(620.0, 400.0, -85.0, 0x00ff80),
            basic(280.0, 100.0, 60.0, 0x8080ff),
        ],
        ..level("Underground Chamber", BiomeId::Underground)
    }
}

fn arctic_zone() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(50.0, 520.0),
        exit: at(400.0, 100.0),
        platforms: vec![
            seg(0.0, 584.0, 160.0),
            seg(224.0, 584.0, 192.0),
            seg(480.0, 584.0, 160.0),
            seg(704.0, 584.0, 96.0),
            seg(96.0, 500.0, 96.0),
            seg(352.0, 520.0, 128.0),
            seg(640.0, 500.0, 128.0),
            seg(32.0, 420.0, 128.0),
            seg(224.0, 440.0, 96.0),
            seg(400.0, 420.0, 160.0),
            seg(640.0, 440.0, 96.0),
            seg(128.0, 340.0, 128.0),
            seg(320.0, 360.0, 96.0),
            seg(480.0, 340.0, 128.0),
            seg(680.0, 360.0, 96.0),
            seg(64.0, 260.0, 96.0),
            seg(224.0, 280.0, 128.0),
            seg(416.0, 260.0, 96.0),
            seg(576.0, 280.0, 128.0),
            seg(160.0, 180.0, 96.0),
            seg(320.0, 200.0, 160.0),
            seg(544.0, 180.0, 96.0),
            seg(96.0, 120.0, 128.0),
            seg(288.0, 120.0, 224.0),
            seg(576.0, 120.0, 128.0),
        ],
        collectibles: vec![
            at(80.0, 564.0),
            at(280.0, 564.0),
            at(360.0, 564.0),
            at(540.0, 564.0),
            at(740.0, 564.0),
            at(144.0, 480.0),
            at(400.0, 500.0),
            at(680.0, 480.0),
            at(80.0, 400.0),
            at(272.0, 420.0),
            at(480.0, 400.0),
            at(688.0, 420.0),
            at(176.0, 320.0),
            at(368.0, 340.0),
            at(528.0, 320.0),
            at(728.0, 340.0),
            at(112.0, 240.0),
            at(280.0, 260.0),
            at(464.0, 240.0),
            at(632.0, 260.0),
            at(208.0, 160.0),
            at(368.0, 180.0),
            at(432.0, 180.0),
            at(592.0, 160.0),
            at(144.0, 100.0),
            at(336.0, 100.0),
            at(400.0, 100.0),
            at(464.0, 100.0),
            at(624.0, 100.0),
        ],
        air_capsules: vec![at(100.0, 400.0), at(550.0, 240.0)],
        enemies: vec![
            enemy(300.0, 550.0, EnemyOne, -100.0),
            enemy(480.0, 400.0, EnemyTwo, 90.0),
            basic(200.0, 320.0, 70.0, 0xaaffff),
            basic(500.0, 240.0, -85.0, 0x0080ff),
            basic(370.0, 180.0, 60.0, 0x80c0ff),
            basic(650.0, 340.0, -75.0, 0x00ffff),
        ],
        ..level("Arctic Zone", BiomeId::Arctic)
    }
}

fn mushroom_grotto() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(60.0, 540.0),
        exit: at(700.0, 120.0),
        platforms: vec![
            seg(0.0, 584.0, 320.0),
            seg(416.0, 584.0, 384.0),
            seg(96.0, 480.0, 128.0),
            seg(320.0, 480.0, 160.0),
            seg(576.0, 480.0, 128.0),
            seg(0.0, 380.0, 160.0),
            seg(224.0, 380.0, 128.0),
            seg(448.0, 380.0, 192.0),
            seg(128.0, 280.0, 160.0),
            seg(384.0, 280.0, 128.0),
            seg(608.0, 280.0, 160.0),
            seg(256.0, 180.0, 192.0),
            seg(608.0, 160.0, 160.0),
        ],
        collectibles: vec![
            at(160.0, 564.0),
            at(520.0, 564.0),
            at(720.0, 564.0),
            at(160.0, 460.0),
            at(400.0, 460.0),
            at(640.0, 460.0),
            at(64.0, 360.0),
            at(288.0, 360.0),
            at(544.0, 360.0),
            at(208.0, 260.0),
            at(448.0, 260.0),
            at(688.0, 260.0),
            at(320.0, 160.0),
            at(400.0, 160.0),
        ],
        air_capsules: vec![at(32.0, 360.0), at(660.0, 140.0)],
        enemies: vec![
            enemy(500.0, 550.0, EnemyThree, 70.0),
            enemy(350.0, 450.0, EnemyOne, -80.0),
            enemy(500.0, 350.0, EnemyTwo, 75.0),
            basic(200.0, 250.0, 60.0, 0x88ff88),
        ],
        ..level("Mushroom Grotto", BiomeId::Forest)
    }
}

fn molten_core() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(40.0, 540.0),
        exit: at(760.0, 540.0),
        platforms: vec![
            seg(0.0, 584.0, 128.0),
            seg(672.0, 584.0, 128.0),
            seg(160.0, 520.0, 96.0),
            seg(320.0, 480.0, 96.0),
            seg(480.0, 440.0, 96.0),
            seg(608.0, 380.0, 128.0),
            seg(416.0, 320.0, 128.0),
            seg(192.0, 280.0, 160.0),
            seg(32.0, 200.0, 128.0),
            seg(224.0, 140.0, 352.0),
            seg(640.0, 200.0, 128.0),
            seg(544.0, 520.0, 96.0),
        ],
        collectibles: vec![
            at(64.0, 564.0),
            at(208.0, 500.0),
            at(368.0, 460.0),
            at(528.0, 420.0),
            at(672.0, 360.0),
            at(480.0, 300.0),
            at(272.0, 260.0),
            at(96.0, 180.0),
            at(288.0, 120.0),
            at(400.0, 120.0),
            at(512.0, 120.0),
            at(704.0, 180.0),
            at(592.0, 500.0),
        ],
        air_capsules: vec![at(240.0, 260.0), at(700.0, 560.0)],
        enemies: vec![
            enemy(400.0, 110.0, EnemyFour, 90.0),
            enemy(660.0, 350.0, EnemyTwo, -70.0),
            basic(250.0, 250.0, 65.0, 0xff6600),
            basic(100.0, 170.0, -60.0, 0xff2200),
        ],
        ..level("Molten Core", BiomeId::Lava)
    }
}

fn crystal_caverns() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(400.0, 540.0),
        exit: at(400.0, 80.0),
        platforms: vec![
            seg(0.0, 584.0, 800.0),
            seg(64.0, 500.0, 128.0),
            seg(608.0, 500.0, 128.0),
            seg(256.0, 420.0, 288.0),
            seg(0.0, 340.0, 160.0),
            seg(640.0, 340.0, 160.0),
            seg(224.0, 260.0, 96.0),
            seg(480.0, 260.0, 96.0),
            seg(96.0, 180.0, 128.0),
            seg(576.0, 180.0, 128.0),
            seg(320.0, 110.0, 160.0),
        ],
        collectibles: vec![
            at(32.0, 564.0),
            at(768.0, 564.0),
            at(128.0, 480.0),
            at(672.0, 480.0),
            at(320.0, 400.0),
            at(480.0, 400.0),
            at(64.0, 320.0),
            at(736.0, 320.0),
            at(272.0, 240.0),
            at(528.0, 240.0),
            at(160.0, 160.0),
            at(640.0, 160.0),
        ],
        air_capsules: vec![at(400.0, 400.0)],
        enemies: vec![
            enemy(200.0, 550.0, EnemyThree, 85.0),
            enemy(600.0, 550.0, EnemyThree, -85.0),
            enemy(400.0, 390.0, EnemyOne, 70.0),
            basic(700.0, 310.0, -60.0, 0xff88ff),
            basic(100.0, 310.0, 60.0, 0x8800ff),
        ],
        ..level("Crystal Caverns", BiomeId::Crystal)
    }
}

fn toxic_tunnels() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(40.0, 120.0),
        exit: at(760.0, 540.0),
        platforms: vec![
            seg(0.0, 160.0, 256.0),
            seg(320.0, 160.0, 480.0),
            seg(96.0, 260.0, 576.0),
            seg(0.0, 360.0, 224.0),
            seg(288.0, 360.0, 512.0),
            seg(128.0, 460.0, 544.0),
            seg(0.0, 584.0, 800.0),
        ],
        collectibles: vec![
            at(160.0, 140.0),
            at(480.0, 140.0),
            at(720.0, 140.0),
            at(192.0, 240.0),
            at(384.0, 240.0),
            at(608.0, 240.0),
            at(96.0, 340.0),
            at(416.0, 340.0),
            at(736.0, 340.0),
            at(256.0, 440.0),
            at(544.0, 440.0),
            at(96.0, 564.0),
            at(400.0, 564.0),
        ],
        air_capsules: vec![at(640.0, 140.0), at(32.0, 340.0), at(600.0, 564.0)],
        enemies: vec![
            enemy(500.0, 130.0, EnemyTwo, -90.0),
            enemy(300.0, 230.0, EnemyFour, 80.0),
            enemy(550.0, 330.0, EnemyOne, -95.0),
            basic(400.0, 430.0, 75.0, 0x00ff00),
            basic(250.0, 550.0, -70.0, 0x88ff00),
        ],
        ..level("Toxic Tunnels", BiomeId::Toxic)
    }
}

fn slime_pits() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(60.0, 540.0),
        exit: at(740.0, 100.0),
        platforms: vec![
            seg(0.0, 584.0, 224.0),
            seg(288.0, 584.0, 224.0),
            seg(576.0, 584.0, 224.0),
            seg(160.0, 480.0, 128.0),
            seg(448.0, 480.0, 128.0),
            seg(32.0, 400.0, 96.0),
            seg(320.0, 400.0, 96.0),
            seg(640.0, 400.0, 128.0),
            seg(192.0, 300.0, 160.0),
            seg(480.0, 300.0, 160.0),
            seg(64.0, 200.0, 128.0),
            seg(352.0, 200.0, 96.0),
            seg(608.0, 140.0, 192.0),
        ],
        collectibles: vec![
            at(112.0, 564.0),
            at(400.0, 564.0),
            at(688.0, 564.0),
            at(224.0, 460.0),
            at(512.0, 460.0),
            at(80.0, 380.0),
            at(368.0, 380.0),
            at(704.0, 380.0),
            at(272.0, 280.0),
            at(560.0, 280.0),
            at(128.0, 180.0),
            at(400.0, 180.0),
            at(672.0, 120.0),
        ],
        air_capsules: vec![at(32.0, 380.0), at(448.0, 180.0)],
        enemies: vec![
            enemy(380.0, 550.0, EnemyThree, 60.0),
            enemy(500.0, 450.0, EnemyOne, -65.0),
            enemy(560.0, 270.0, EnemyFour, 70.0),
            basic(700.0, 370.0, -55.0, 0x44dd66),
            basic(120.0, 170.0, 50.0, 0x66ff88),
        ],
        ..level("Slime Pits", BiomeId::Slime)
    }
}

fn final_descent() -> LevelDefinition {
    use EnemyKind::*;
    LevelDefinition {
        player_start: at(400.0, 80.0),
        exit: at(400.0, 540.0),
        platforms: vec![
            seg(320.0, 120.0, 160.0),
            seg(96.0, 200.0, 192.0),
            seg(512.0, 200.0, 192.0),
            seg(0.0, 280.0, 160.0),
            seg(320.0, 280.0, 160.0),
            seg(640.0, 280.0, 160.0),
            seg(160.0, 360.0, 160.0),
            seg(480.0, 360.0, 160.0),
            seg(32.0, 440.0, 128.0),
            seg(336.0, 440.0, 128.0),
            seg(640.0, 440.0, 128.0),
            seg(0.0, 584.0, 800.0),
        ],
        collectibles: vec![
            at(160.0, 180.0),
            at(240.0, 180.0),
            at(560.0, 180.0),
            at(640.0, 180.0),
            at(64.0, 260.0),
            at(400.0, 260.0),
            at(736.0, 260.0),
            at(224.0, 340.0),
            at(560.0, 340.0),
            at(96.0, 420.0),
            at(400.0, 420.0),
            at(704.0, 420.0),
            at(160.0, 564.0),
            at(640.0, 564.0),
        ],
        air_capsules: vec![at(128.0, 420.0), at(672.0, 420.0)],
        enemies: vec![
            enemy(200.0, 170.0, EnemyOne, 80.0),
            enemy(600.0, 170.0, EnemyTwo, -80.0),
            enemy(400.0, 250.0, EnemyThree, 90.0),
            enemy(240.0, 330.0, EnemyFour, -85.0),
            basic(560.0, 330.0, 75.0, 0xff0000),
            basic(300.0, 550.0, -90.0, 0xffff00),
        ],
        ..level("The Final Descent", BiomeId::Cavern)
    }
}
