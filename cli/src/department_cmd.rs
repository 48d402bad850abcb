//! `probation department` — department reference information.

use probation_core::department::DepartmentClient;

use crate::AppContext;

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let info = DepartmentClient::new(ctx.store.clone()).load().await?;

    if !info.mission.is_empty() {
        println!("Mission\n  {}\n", info.mission);
    }
    if !info.phones.is_empty() {
        println!("Phone Numbers");
        for phone in &info.phones {
            println!("  {}: {}", phone.label, phone.number);
        }
        println!();
    }
    if !info.door_codes.is_empty() {
        println!("Door Codes");
        for door in &info.door_codes {
            println!("  {}: {}", door.location, door.code);
        }
        println!();
    }
    if !info.radio_channels.is_empty() {
        println!("Radio Channels");
        for channel in &info.radio_channels {
            if channel.notes.is_empty() {
                println!("  {} — {}", channel.name, channel.freq);
            } else {
                println!("  {} — {} ({})", channel.name, channel.freq, channel.notes);
            }
        }
        println!();
    }
    if !info.chain_of_command.is_empty() {
        println!("Chain of Command");
        for entry in &info.chain_of_command {
            println!("  {}: {} ({})", entry.role, entry.name, entry.contact);
        }
        println!();
    }
    if !info.history.is_empty() {
        println!("History\n  {}\n", info.history);
    }
    if !info.station_duties.is_empty() {
        println!("Station Duties");
        for duty in &info.station_duties {
            println!("  - {duty}");
        }
        println!();
    }
    if !info.typical_day.is_empty() {
        println!("Typical Day\n  {}", info.typical_day);
    }
    Ok(())
}
