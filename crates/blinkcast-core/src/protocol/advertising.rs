//! Advertising payload codec for the blinkcast protocol
//!
//! Advertising payloads are repeated records of the following form:
//!   1 byte data length (N + 1)
//!   1 byte record type
//!   N bytes type-specific data
//!
//! The whole payload is capped at 31 bytes; the builder enforces that cap as
//! a hard post-condition. Scanning the payload back out never fails; a
//! record that is absent or garbled simply does not contribute a result.

use alloc::string::String;
use alloc::vec::Vec;

use crate::errors::AdvertisingError;
use crate::types::{CompanyId, ServiceId};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Maximum total advertising payload size in bytes
pub const MAX_PAYLOAD_LEN: usize = 31;

/// Flags record (discoverability / BR-EDR support)
pub const ADV_TYPE_FLAGS: u8 = 0x01;

/// Complete list of 16-bit service identifiers
pub const ADV_TYPE_UUID16_COMPLETE: u8 = 0x03;

/// Complete list of 32-bit service identifiers
pub const ADV_TYPE_UUID32_COMPLETE: u8 = 0x05;

/// Complete list of 128-bit service identifiers
pub const ADV_TYPE_UUID128_COMPLETE: u8 = 0x07;

/// Complete local name
pub const ADV_TYPE_NAME: u8 = 0x09;

/// Appearance (16-bit, little-endian)
pub const ADV_TYPE_APPEARANCE: u8 = 0x19;

/// Manufacturer specific data (company id + opaque payload)
pub const ADV_TYPE_MANUFACTURER_DATA: u8 = 0xFF;

// ----------------------------------------------------------------------------
// Record Codec
// ----------------------------------------------------------------------------

/// Encode a single advertising record as `[len + 1, type] ++ value`
///
/// No size-limit check happens here; the payload budget is enforced by
/// [`Advertisement::build`].
pub fn encode_record(adv_type: u8, value: &[u8]) -> Vec<u8> {
    debug_assert!(value.len() < u8::MAX as usize);

    let mut record = Vec::with_capacity(2 + value.len());
    record.push(value.len() as u8 + 1);
    record.push(adv_type);
    record.extend_from_slice(value);
    record
}

/// Append one record, rejecting values the payload could never carry
///
/// A value longer than `MAX_PAYLOAD_LEN - 2` cannot fit any payload (and a
/// value near 255 bytes would wrap the length byte), so it fails here before
/// [`encode_record`] runs rather than at the final budget check.
fn append_record(
    payload: &mut Vec<u8>,
    adv_type: u8,
    value: &[u8],
) -> Result<(), AdvertisingError> {
    if 2 + value.len() > MAX_PAYLOAD_LEN {
        return Err(AdvertisingError::PayloadTooLarge {
            max: MAX_PAYLOAD_LEN,
            actual: payload.len() + 2 + value.len(),
        });
    }
    payload.extend_from_slice(&encode_record(adv_type, value));
    Ok(())
}

/// Scan a payload and collect the values of every record of `wanted_type`
///
/// The scan is bounds-safe against garbled length bytes: a zero length yields
/// an empty value (the record is still counted), and a length reaching past
/// the end of the buffer is clamped. The offset advances by at least one byte
/// per step, so the scan always terminates.
pub fn records_of_type(payload: &[u8], wanted_type: u8) -> Vec<&[u8]> {
    let mut records = Vec::new();
    let mut i = 0;

    while i + 1 < payload.len() {
        let length = payload[i] as usize;
        let adv_type = payload[i + 1];

        if adv_type == wanted_type {
            let start = core::cmp::min(i + 2, payload.len());
            let end = core::cmp::min(i + 1 + length, payload.len());
            records.push(&payload[start..core::cmp::max(start, end)]);
        }

        i += 1 + length;
    }

    records
}

// ----------------------------------------------------------------------------
// Payload Builder
// ----------------------------------------------------------------------------

/// Builder for a broadcastable advertising payload
///
/// Records are always emitted in a fixed order: flags, name, services (in
/// input order), manufacturer data, appearance. Building is a pure function
/// of the configured options.
#[derive(Debug, Clone, Default)]
pub struct Advertisement {
    limited_discoverable: Option<bool>,
    br_edr_supported: Option<bool>,
    name: Option<String>,
    services: Vec<ServiceId>,
    manufacturer: Option<(CompanyId, Vec<u8>)>,
    appearance: Option<i16>,
}

impl Advertisement {
    /// Create an empty advertisement
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the discoverability flags record
    pub fn flags(mut self, limited_discoverable: bool, br_edr_supported: bool) -> Self {
        self.limited_discoverable = Some(limited_discoverable);
        self.br_edr_supported = Some(br_edr_supported);
        self
    }

    /// Set the complete local name
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add one service identifier to the complete service list
    pub fn service(mut self, service: ServiceId) -> Self {
        self.services.push(service);
        self
    }

    /// Set the manufacturer field: company id plus opaque application data
    pub fn manufacturer_data(mut self, company_id: CompanyId, data: Vec<u8>) -> Self {
        self.manufacturer = Some((company_id, data));
        self
    }

    /// Set the appearance value (encoded little-endian)
    pub fn appearance(mut self, appearance: i16) -> Self {
        self.appearance = Some(appearance);
        self
    }

    /// Assemble the payload, failing if it exceeds [`MAX_PAYLOAD_LEN`]
    pub fn build(&self) -> Result<Vec<u8>, AdvertisingError> {
        let mut payload = Vec::new();

        if self.limited_discoverable.is_some() || self.br_edr_supported.is_some() {
            let limited = self.limited_discoverable.unwrap_or(false);
            let br_edr = self.br_edr_supported.unwrap_or(false);
            let flags = if limited { 0x01 } else { 0x02 } + if br_edr { 0x00 } else { 0x04 };
            append_record(&mut payload, ADV_TYPE_FLAGS, &[flags])?;
        }

        if let Some(ref name) = self.name {
            append_record(&mut payload, ADV_TYPE_NAME, name.as_bytes())?;
        }

        for service in &self.services {
            let adv_type = match service.width() {
                2 => ADV_TYPE_UUID16_COMPLETE,
                4 => ADV_TYPE_UUID32_COMPLETE,
                _ => ADV_TYPE_UUID128_COMPLETE,
            };
            append_record(&mut payload, adv_type, &service.to_le_bytes())?;
        }

        if let Some((company_id, ref data)) = self.manufacturer {
            let mut value = Vec::with_capacity(2 + data.len());
            value.extend_from_slice(company_id.as_bytes());
            value.extend_from_slice(data);
            append_record(&mut payload, ADV_TYPE_MANUFACTURER_DATA, &value)?;
        }

        if let Some(appearance) = self.appearance {
            append_record(&mut payload, ADV_TYPE_APPEARANCE, &appearance.to_le_bytes())?;
        }

        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(AdvertisingError::PayloadTooLarge {
                max: MAX_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }

        Ok(payload)
    }
}

// ----------------------------------------------------------------------------
// Payload Scanner
// ----------------------------------------------------------------------------

/// Manufacturer field extracted from a received payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerField {
    /// Two-byte company identifier
    pub company_id: CompanyId,
    /// Opaque application data (a TLV byte-stream in this protocol)
    pub data: Vec<u8>,
}

/// Extract the complete local name from a received payload
///
/// Returns an empty string if no name record is present. Never fails; bytes
/// that are not valid UTF-8 are decoded lossily.
pub fn extract_name(payload: &[u8]) -> String {
    records_of_type(payload, ADV_TYPE_NAME)
        .first()
        .map(|value| String::from_utf8_lossy(value).into_owned())
        .unwrap_or_default()
}

/// Extract every service identifier from the complete-service-list records
///
/// Record values whose width does not match their record type are skipped.
pub fn extract_services(payload: &[u8]) -> Vec<ServiceId> {
    let mut services = Vec::new();

    for value in records_of_type(payload, ADV_TYPE_UUID16_COMPLETE) {
        if let Ok(bytes) = <[u8; 2]>::try_from(value) {
            services.push(ServiceId::Uuid16(u16::from_le_bytes(bytes)));
        }
    }
    for value in records_of_type(payload, ADV_TYPE_UUID32_COMPLETE) {
        if let Ok(bytes) = <[u8; 4]>::try_from(value) {
            services.push(ServiceId::Uuid32(u32::from_le_bytes(bytes)));
        }
    }
    for value in records_of_type(payload, ADV_TYPE_UUID128_COMPLETE) {
        if let Ok(bytes) = <[u8; 16]>::try_from(value) {
            services.push(ServiceId::Uuid128(bytes));
        }
    }

    services
}

/// Extract the manufacturer field from a received payload
///
/// Returns `None` when no manufacturer record is present or when its value is
/// two bytes or shorter (a company id with no data is not a usable field).
pub fn extract_manufacturer_field(payload: &[u8]) -> Option<ManufacturerField> {
    let records = records_of_type(payload, ADV_TYPE_MANUFACTURER_DATA);
    let value = records.first()?;

    if value.len() <= 2 {
        return None;
    }

    Some(ManufacturerField {
        company_id: CompanyId::new([value[0], value[1]]),
        data: value[2..].to_vec(),
    })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_encode_record_layout() {
        let record = encode_record(ADV_TYPE_NAME, b"abc");
        assert_eq!(record, [0x04, 0x09, b'a', b'b', b'c']);
    }

    #[test]
    fn test_encode_record_empty_value() {
        let record = encode_record(ADV_TYPE_FLAGS, &[]);
        assert_eq!(record, [0x01, ADV_TYPE_FLAGS]);
    }

    #[test]
    fn test_records_of_type_zero_length_record() {
        // A zero length byte still counts as a record with an empty value
        // and must not stall or overrun the scan.
        let payload = [0x00, ADV_TYPE_NAME, 0x04, ADV_TYPE_NAME, b'a', b'b', b'c'];
        let records = records_of_type(&payload, ADV_TYPE_NAME);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], b"");
        assert_eq!(records[1], b"abc");
    }

    #[test]
    fn test_records_of_type_clamps_overlong_length() {
        // Length byte claims more bytes than the buffer holds.
        let payload = [0x09, ADV_TYPE_NAME, b'h', b'i'];
        let records = records_of_type(&payload, ADV_TYPE_NAME);
        assert_eq!(records, vec![&b"hi"[..]]);
    }

    #[test]
    fn test_flags_byte_arithmetic() {
        let payload = Advertisement::new().flags(false, false).build().unwrap();
        assert_eq!(payload, [0x02, ADV_TYPE_FLAGS, 0x02 + 0x04]);

        let payload = Advertisement::new().flags(true, true).build().unwrap();
        assert_eq!(payload, [0x02, ADV_TYPE_FLAGS, 0x01]);
    }

    #[test]
    fn test_build_name_only() {
        let payload = Advertisement::new().name("abc").build().unwrap();
        assert_eq!(payload, [0x04, ADV_TYPE_NAME, b'a', b'b', b'c']);
        assert_eq!(extract_name(&payload), "abc");
    }

    #[test]
    fn test_build_record_order_is_fixed() {
        let payload = Advertisement::new()
            .appearance(0x0341)
            .manufacturer_data(CompanyId::TEST, vec![0xDE, 0xAD])
            .name("n")
            .flags(false, false)
            .build()
            .unwrap();

        // flags, name, manufacturer data, appearance, regardless of the
        // order the builder methods were called in.
        assert_eq!(payload[1], ADV_TYPE_FLAGS);
        assert_eq!(payload[4], ADV_TYPE_NAME);
        assert_eq!(payload[7], ADV_TYPE_MANUFACTURER_DATA);
        assert_eq!(payload[13], ADV_TYPE_APPEARANCE);
    }

    #[test]
    fn test_build_services_by_width() {
        let payload = Advertisement::new()
            .service(ServiceId::Uuid16(0x181A))
            .service(ServiceId::Uuid32(0x12345678))
            .service(ServiceId::Uuid128([0xAB; 16]))
            .build()
            .unwrap();

        let services = extract_services(&payload);
        assert_eq!(
            services,
            vec![
                ServiceId::Uuid16(0x181A),
                ServiceId::Uuid32(0x12345678),
                ServiceId::Uuid128([0xAB; 16]),
            ]
        );
    }

    #[test]
    fn test_build_payload_budget() {
        // 29-byte name → 2 + 29 = 31 bytes exactly: allowed.
        let name_29: String = core::iter::repeat('x').take(29).collect();
        let payload = Advertisement::new().name(name_29).build().unwrap();
        assert_eq!(payload.len(), MAX_PAYLOAD_LEN);

        // 30-byte name → 32 bytes: hard failure, no truncation.
        let name_30: String = core::iter::repeat('x').take(30).collect();
        let err = Advertisement::new().name(name_30).build().unwrap_err();
        assert_eq!(
            err,
            AdvertisingError::PayloadTooLarge {
                max: MAX_PAYLOAD_LEN,
                actual: 32
            }
        );
    }

    #[test]
    fn test_oversized_name_is_an_error_not_a_panic() {
        // A 255-byte value would wrap the one-byte length field; the builder
        // must return the budget error before any record is encoded.
        let name_255: String = core::iter::repeat('x').take(255).collect();
        let err = Advertisement::new().name(name_255).build().unwrap_err();
        assert!(matches!(err, AdvertisingError::PayloadTooLarge { .. }));

        let name_300: String = core::iter::repeat('x').take(300).collect();
        let err = Advertisement::new().name(name_300).build().unwrap_err();
        assert!(matches!(err, AdvertisingError::PayloadTooLarge { .. }));
    }

    #[test]
    fn test_oversized_manufacturer_data_is_an_error() {
        let payload = Advertisement::new()
            .manufacturer_data(CompanyId::TEST, vec![0u8; 254])
            .build();
        assert!(matches!(
            payload,
            Err(AdvertisingError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn test_extract_name_absent_or_invalid() {
        assert_eq!(extract_name(&[]), "");
        assert_eq!(extract_name(&[0x02, ADV_TYPE_FLAGS, 0x06]), "");

        // Invalid UTF-8 decodes lossily rather than failing.
        let payload = encode_record(ADV_TYPE_NAME, &[0xFF, 0xFE]);
        assert_eq!(extract_name(&payload), "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_extract_manufacturer_field() {
        let payload = Advertisement::new()
            .manufacturer_data(CompanyId::TEST, vec![0xDE, 0xAD, 0xBE, 0xEF])
            .build()
            .unwrap();

        let field = extract_manufacturer_field(&payload).unwrap();
        assert_eq!(field.company_id, CompanyId::TEST);
        assert_eq!(field.data, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_extract_manufacturer_field_absent_or_short() {
        // No manufacturer record at all.
        let payload = Advertisement::new().name("x").build().unwrap();
        assert!(extract_manufacturer_field(&payload).is_none());

        // Company id with nothing behind it is not a usable field.
        let payload = encode_record(ADV_TYPE_MANUFACTURER_DATA, &[0xFF, 0xFF]);
        assert!(extract_manufacturer_field(&payload).is_none());
    }

    #[test]
    fn test_appearance_little_endian() {
        let payload = Advertisement::new().appearance(0x0341).build().unwrap();
        assert_eq!(payload, [0x03, ADV_TYPE_APPEARANCE, 0x41, 0x03]);
    }
}
