use packwire::{Encode, Packer, Reader, Result, Strategy, pack, unpack};

#[test]
fn test_integer_layout_is_little_endian() -> Result<()> {
    assert_eq!(pack(&0x12345678u32)?, [0x78, 0x56, 0x34, 0x12]);
    assert_eq!(pack(&-1i32)?, [0xFF; 4]);
    assert_eq!(pack(&1i64)?, [1, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(pack(&0xBEEFu16)?, [0xEF, 0xBE]);
    assert_eq!(pack(&-2i8)?, [0xFE]);
    Ok(())
}

#[test]
fn test_integer_boundaries_round_trip() -> Result<()> {
    for value in [0u32, 1, u32::MAX] {
        assert_eq!(unpack::<u32>(&pack(&value)?)?, value);
    }
    for value in [0i64, -1, i64::MIN, i64::MAX] {
        assert_eq!(unpack::<i64>(&pack(&value)?)?, value);
    }
    for value in [0i32, -1, i32::MIN, i32::MAX] {
        assert_eq!(unpack::<i32>(&pack(&value)?)?, value);
    }
    for value in [0u8, u8::MAX] {
        assert_eq!(unpack::<u8>(&pack(&value)?)?, value);
    }
    for value in [i16::MIN, -1, i16::MAX] {
        assert_eq!(unpack::<i16>(&pack(&value)?)?, value);
    }
    assert_eq!(unpack::<u64>(&pack(&u64::MAX)?)?, u64::MAX);
    Ok(())
}

#[test]
fn test_bool_encoding() -> Result<()> {
    assert_eq!(pack(&true)?, [1]);
    assert_eq!(pack(&false)?, [0]);

    // Any nonzero byte decodes as true.
    assert!(unpack::<bool>(&[0x7F])?);
    assert!(!unpack::<bool>(&[0])?);
    Ok(())
}

#[test]
fn test_float_round_trip() -> Result<()> {
    for value in [0.0f64, -0.0, 1.5, f64::MIN, f64::MAX, f64::INFINITY, f64::NEG_INFINITY] {
        let decoded: f64 = unpack(&pack(&value)?)?;
        assert_eq!(decoded.to_bits(), value.to_bits());
    }

    let nan: f64 = unpack(&pack(&f64::NAN)?)?;
    assert!(nan.is_nan());

    assert_eq!(pack(&1.0f64)?, 1.0f64.to_bits().to_le_bytes());
    Ok(())
}

#[test]
fn test_string_layout() -> Result<()> {
    assert_eq!(pack("ok")?, [2, 0, 0, 0, b'o', b'k']);
    assert_eq!(pack("")?, [0, 0, 0, 0]);

    // Prefix counts bytes, not characters.
    let bytes = pack("é")?;
    assert_eq!(&bytes[..4], [2, 0, 0, 0]);
    assert_eq!(unpack::<String>(&bytes)?, "é");
    Ok(())
}

#[test]
fn test_long_string_round_trip() -> Result<()> {
    let value = "x".repeat(70_000);
    let bytes = pack(&value)?;
    assert_eq!(bytes.len(), 4 + 70_000);
    assert_eq!(unpack::<String>(&bytes)?, value);
    Ok(())
}

#[test]
fn test_read_str_borrows_from_payload() -> Result<()> {
    let bytes = pack("borrowed")?;
    let mut reader = Reader::new(&bytes);
    let value: &str = reader.read_str()?;
    assert_eq!(value, "borrowed");
    reader.finalize()
}

#[test]
fn test_mixed_arguments_in_order() -> Result<()> {
    let mut packer = Packer::new();
    packer.serialize(&7u32)?;
    packer.serialize(&-9i64)?;
    packer.serialize(&3i32)?;
    packer.serialize(&true)?;
    packer.serialize(&2.5f64)?;
    packer.serialize("tail")?;
    let bytes = packer.end_pack()?;
    assert_eq!(bytes.len(), 4 + 8 + 4 + 1 + 8 + 4 + 4);

    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.deserialize::<u32>()?, 7);
    assert_eq!(reader.deserialize::<i64>()?, -9);
    assert_eq!(reader.deserialize::<i32>()?, 3);
    assert!(reader.deserialize::<bool>()?);
    assert_eq!(reader.deserialize::<f64>()?, 2.5);
    assert_eq!(reader.deserialize::<String>()?, "tail");
    reader.finalize()
}

#[test]
fn test_builtin_strategies() {
    assert_eq!(<u8 as Encode>::STRATEGY, Strategy::Primitive);
    assert_eq!(<bool as Encode>::STRATEGY, Strategy::Primitive);
    assert_eq!(<f64 as Encode>::STRATEGY, Strategy::Primitive);
    assert_eq!(<String as Encode>::STRATEGY, Strategy::String);
    assert_eq!(<str as Encode>::STRATEGY, Strategy::String);
    assert_eq!(<&str as Encode>::STRATEGY, Strategy::String);
    assert_eq!(<Vec<u32> as Encode>::STRATEGY, Strategy::Sequence);
    assert_eq!(<[u32] as Encode>::STRATEGY, Strategy::Sequence);
    assert_eq!(<Option<u32> as Encode>::STRATEGY, Strategy::DiscriminatedUnion);
    assert_eq!(<(u32, String) as Encode>::STRATEGY, Strategy::Composite);
    assert_eq!(<Box<String> as Encode>::STRATEGY, Strategy::String);
    assert!(Strategy::Sequence.is_length_prefixed());
    assert!(!Strategy::Composite.is_length_prefixed());
}
