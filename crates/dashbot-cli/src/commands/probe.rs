//! Probe command: attach once and print what the bot would see.

use anyhow::Result;
use dashbot::{
    BotConfig, EntityLocator, GAME_PROCESS_NAME, MemoryReader, OffsetTable, ProcessHandle,
    SnapshotBuilder, decide,
};

pub fn run(config: &BotConfig, offsets: &OffsetTable, json: bool) -> Result<()> {
    let process = ProcessHandle::find_and_open()?;
    let reader = MemoryReader::new(&process);

    let locator = EntityLocator::new(
        &reader,
        reader.base_address(),
        offsets,
        config.object_scan_limit,
    );
    let snapshot = SnapshotBuilder::from_config(config).build(&locator);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let info = process.info();
    let entities = locator.resolve();
    let address = |handle: Option<dashbot::EntityHandle>| match handle {
        Some(h) => format!("0x{:X}", h.address()),
        None => "null".to_string(),
    };

    println!("=== {} (PID {}) ===", GAME_PROCESS_NAME, info.pid);
    println!("Base:        0x{:X} (size 0x{:X})", info.base_address, info.module_size);
    println!("Offsets:     {}", offsets.version);
    println!("Play layer:  {}", address(entities.play_layer));
    println!("Player:      {}", address(entities.player));
    match entities.objects {
        Some(objects) => println!(
            "Objects:     0x{:X} ({} slots)",
            objects.handle.address(),
            objects.count
        ),
        None => println!("Objects:     null"),
    }
    println!();

    if entities.player.is_none() {
        println!("No level loaded");
        return Ok(());
    }

    println!(
        "Player:      ({:.1}, {:.1}){}",
        snapshot.player.x,
        snapshot.player.y,
        if snapshot.is_dead { " DEAD" } else { "" }
    );
    println!("Game speed:  {:.2}", snapshot.game_speed);
    println!("Obstacles ahead: {}", snapshot.obstacles.len());
    for (i, obstacle) in snapshot.obstacles.iter().enumerate() {
        println!(
            "  [{}] ({:.1}, {:.1}) width={:.1} type={}",
            i, obstacle.x, obstacle.y, obstacle.width, obstacle.kind
        );
    }
    println!("Decision:    {}", decide(&snapshot));

    Ok(())
}
