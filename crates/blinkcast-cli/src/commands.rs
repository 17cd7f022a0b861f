//! Subcommand execution

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use blinkcast_core::commands::{buzzer, pixels, screen, Note, Rgb, Song};
use blinkcast_core::protocol::{advertising, tlv};
use blinkcast_core::{Advertisement, CompanyId, DispatchPolicy, DispatchTable, ServiceId, TrailerPolicy};

use crate::actuators::{LogBuzzer, LogPixels, LogScreen};
use crate::cli::{Commands, HardwareCommand};

pub fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Build {
            name,
            service,
            company_id,
            limited,
            br_edr,
            command,
        } => build(name, service, &company_id, limited, br_edr, command),
        Commands::Inspect { payload, lenient } => inspect(&payload, lenient),
        Commands::Apply {
            payload,
            company_id,
            lenient,
            strict_unknown,
        } => apply(&payload, &company_id, lenient, strict_unknown),
    }
}

// ----------------------------------------------------------------------------
// build
// ----------------------------------------------------------------------------

fn build(
    name: Option<String>,
    services: Vec<String>,
    company_id: &str,
    limited: bool,
    br_edr: bool,
    command: HardwareCommand,
) -> Result<()> {
    let payload = build_payload(name, &services, company_id, limited, br_edr, command)?;
    info!("built {} byte payload", payload.len());
    println!("{}", hex::encode(&payload));
    Ok(())
}

fn build_payload(
    name: Option<String>,
    services: &[String],
    company_id: &str,
    limited: bool,
    br_edr: bool,
    command: HardwareCommand,
) -> Result<Vec<u8>> {
    let company_id = parse_company_id(company_id)?;
    let stream = encode_command(command)?;

    let mut adv = Advertisement::new().manufacturer_data(company_id, stream);
    // No flags record unless an option asked for one; the default payload
    // spends its budget on the command stream.
    if limited || br_edr {
        adv = adv.flags(limited, br_edr);
    }
    if let Some(name) = name {
        adv = adv.name(name);
    }
    for service in services {
        adv = adv.service(parse_service(service)?);
    }

    adv.build().context("payload does not fit")
}

// ----------------------------------------------------------------------------
// inspect
// ----------------------------------------------------------------------------

fn inspect(payload: &str, lenient: bool) -> Result<()> {
    let payload = hex::decode(payload).context("payload is not valid hex")?;

    let name = advertising::extract_name(&payload);
    if !name.is_empty() {
        println!("name: {}", name);
    }
    for service in advertising::extract_services(&payload) {
        println!("service: {}", service);
    }

    let Some(field) = advertising::extract_manufacturer_field(&payload) else {
        println!("no manufacturer field");
        return Ok(());
    };
    println!("company id: {}", field.company_id);

    let records = tlv::decode_with(&field.data, trailer_policy(lenient))
        .context("command stream is malformed")?;
    for record in &records {
        println!(
            "record: type {} length {} value {}",
            record.tlv_type,
            record.declared_length,
            hex::encode(&record.value)
        );
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// apply
// ----------------------------------------------------------------------------

fn apply(payload: &str, company_id: &str, lenient: bool, strict_unknown: bool) -> Result<()> {
    let wanted = parse_company_id(company_id)?;
    let payload = hex::decode(payload).context("payload is not valid hex")?;

    let Some(field) = advertising::extract_manufacturer_field(&payload) else {
        warn!("no manufacturer field, nothing to apply");
        return Ok(());
    };
    if field.company_id != wanted {
        info!(
            "skipping stream from company {} (wanted {})",
            field.company_id, wanted
        );
        return Ok(());
    }

    let records = tlv::decode_with(&field.data, trailer_policy(lenient))
        .context("command stream is malformed")?;

    let mut table = DispatchTable::new();
    pixels::register_commands(&mut table, Rc::new(RefCell::new(LogPixels)));
    screen::register_commands(&mut table, Rc::new(RefCell::new(LogScreen)));
    buzzer::register_commands(&mut table, Rc::new(RefCell::new(LogBuzzer)));

    let policy = DispatchPolicy {
        skip_unknown: !strict_unknown,
    };
    table
        .apply_all(&records, policy)
        .context("command stream failed to apply")?;
    info!("applied {} record(s)", records.len());
    Ok(())
}

// ----------------------------------------------------------------------------
// Argument Parsing
// ----------------------------------------------------------------------------

fn trailer_policy(lenient: bool) -> TrailerPolicy {
    if lenient {
        TrailerPolicy::Lenient
    } else {
        TrailerPolicy::Strict
    }
}

fn encode_command(command: HardwareCommand) -> Result<Vec<u8>> {
    let stream = match command {
        HardwareCommand::PixelsClear => pixels::encode_clear(),
        HardwareCommand::PixelsSetColor { color } => {
            pixels::encode_set_color(parse_rgb(&color)?)
        }
        HardwareCommand::PixelsSetIndexedColor { index, color } => {
            pixels::encode_set_indexed_color(index, parse_rgb(&color)?)
        }
        HardwareCommand::PixelsSetFiveColors { colors } => {
            let mut parsed = [Rgb::new(0, 0, 0); pixels::STRIP_LEN];
            for (slot, color) in parsed.iter_mut().zip(&colors) {
                *slot = parse_rgb(color)?;
            }
            pixels::encode_set_five_colors(&parsed)
        }
        HardwareCommand::ScreenClear => screen::encode_clear(),
        HardwareCommand::ScreenFill { color } => screen::encode_fill(parse_rgb565(&color)?),
        HardwareCommand::ScreenText { text } => screen::encode_text(&text),
        HardwareCommand::BuzzerNote {
            frequency,
            duration_ms,
            rest_ms,
        } => buzzer::encode_note(Note::new(frequency, duration_ms, rest_ms)),
        HardwareCommand::BuzzerSong { song_id } => {
            buzzer::encode_song(Song::from_id(song_id).context("unknown song id")?)
        }
    };
    Ok(stream.context("command does not fit a record")?)
}

fn parse_company_id(hex_id: &str) -> Result<CompanyId> {
    let bytes = hex::decode(hex_id).context("company id is not valid hex")?;
    let bytes: [u8; 2] = bytes
        .try_into()
        .ok()
        .context("company id must be 4 hex digits")?;
    Ok(CompanyId::new(bytes))
}

fn parse_rgb(hex_color: &str) -> Result<Rgb> {
    let bytes = hex::decode(hex_color).context("color is not valid hex")?;
    match bytes[..] {
        [r, g, b] => Ok(Rgb::new(r, g, b)),
        _ => bail!("color must be 6 hex digits"),
    }
}

fn parse_rgb565(hex_color: &str) -> Result<u16> {
    let bytes = hex::decode(hex_color).context("color is not valid hex")?;
    match bytes[..] {
        [hi, lo] => Ok(u16::from_be_bytes([hi, lo])),
        _ => bail!("color must be 4 hex digits"),
    }
}

fn parse_service(hex_uuid: &str) -> Result<ServiceId> {
    let bytes = hex::decode(hex_uuid).context("service uuid is not valid hex")?;
    match bytes.len() {
        2 => Ok(ServiceId::Uuid16(u16::from_be_bytes([bytes[0], bytes[1]]))),
        4 => Ok(ServiceId::Uuid32(u32::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ]))),
        16 => {
            let mut uuid = [0u8; 16];
            uuid.copy_from_slice(&bytes);
            Ok(ServiceId::Uuid128(uuid))
        }
        _ => bail!("service uuid must be 4, 8, or 32 hex digits"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_company_id() {
        assert_eq!(
            parse_company_id("ffff").unwrap(),
            CompanyId::new([0xFF, 0xFF])
        );
        assert!(parse_company_id("ff").is_err());
        assert!(parse_company_id("zzzz").is_err());
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("dd0000").unwrap(), Rgb::new(0xDD, 0, 0));
        assert!(parse_rgb("dd00").is_err());
    }

    #[test]
    fn test_parse_rgb565() {
        assert_eq!(parse_rgb565("07ff").unwrap(), 0x07FF);
        assert!(parse_rgb565("07").is_err());
    }

    #[test]
    fn test_parse_service_widths() {
        assert_eq!(parse_service("181a").unwrap(), ServiceId::Uuid16(0x181A));
        assert_eq!(
            parse_service("deadbeef").unwrap(),
            ServiceId::Uuid32(0xDEADBEEF)
        );
        assert!(matches!(
            parse_service("000102030405060708090a0b0c0d0e0f").unwrap(),
            ServiceId::Uuid128(_)
        ));
        assert!(parse_service("181").is_err());
    }

    #[test]
    fn test_build_payload_default_has_no_flags_record() {
        use blinkcast_core::protocol::advertising::{records_of_type, ADV_TYPE_FLAGS};

        let payload = build_payload(None, &[], "ffff", false, false, HardwareCommand::PixelsClear)
            .unwrap();
        assert!(records_of_type(&payload, ADV_TYPE_FLAGS).is_empty());
    }

    #[test]
    fn test_build_payload_flag_options_emit_flags_record() {
        use blinkcast_core::protocol::advertising::{records_of_type, ADV_TYPE_FLAGS};

        let payload = build_payload(None, &[], "ffff", true, false, HardwareCommand::PixelsClear)
            .unwrap();
        let flags = records_of_type(&payload, ADV_TYPE_FLAGS);
        assert_eq!(flags, [&[0x01 + 0x04][..]]);
    }

    #[test]
    fn test_encode_command_build_roundtrip() {
        let stream = encode_command(HardwareCommand::ScreenText {
            text: "hi".into(),
        })
        .unwrap();
        let records = tlv::decode(&stream).unwrap();
        assert_eq!(records[0].value, b"hi");
    }
}
