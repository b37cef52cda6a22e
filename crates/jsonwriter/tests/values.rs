use jsonwriter::{JsonWriter, Result, ToJson, Value};

fn encode(f: impl FnOnce(&mut JsonWriter<Vec<u8>>) -> Result<()>) -> String {
    let bytes = jsonwriter::to_vec(f).expect("in-memory sink cannot fail");
    String::from_utf8(bytes).expect("writer output is UTF-8")
}

fn value_str<'v>(v: impl Into<Value<'v>>) -> String {
    encode(|w| w.value(v))
}

#[test]
fn writes_integers_of_every_width() {
    assert_eq!(value_str(1u8), "1");
    assert_eq!(value_str(2u16), "2");
    assert_eq!(value_str(232134u32), "232134");
    assert_eq!(value_str(432434u64), "432434");
    assert_eq!(value_str(5usize), "5");
    assert_eq!(value_str(-3i8), "-3");
    assert_eq!(value_str(-16i16), "-16");
    assert_eq!(value_str(-31i32), "-31");
    assert_eq!(value_str(-4343i64), "-4343");
    assert_eq!(value_str(-59922isize), "-59922");
    assert_eq!(value_str(u64::MAX), "18446744073709551615");
    assert_eq!(value_str(i64::MIN), "-9223372036854775808");
}

#[test]
fn writes_floats_in_shortest_general_notation() {
    assert_eq!(value_str(1.2393f32), "1.2393");
    assert_eq!(value_str(-49493.443f32), "-49493.44");
    assert_eq!(value_str(99499449.23949f64), "9.949944923949e+07");
    assert_eq!(value_str(-3290123.94994f64), "-3.29012394994e+06");
}

#[test]
fn float_notation_edges() {
    assert_eq!(value_str(0.0f64), "0");
    assert_eq!(value_str(-0.0f64), "-0");
    assert_eq!(value_str(1.0f64), "1");
    assert_eq!(value_str(100000.0f64), "100000");
    assert_eq!(value_str(1000000.0f64), "1e+06");
    assert_eq!(value_str(0.0001231f64), "0.0001231");
    assert_eq!(value_str(0.00001f64), "1e-05");
    assert_eq!(value_str(1e21f64), "1e+21");
    assert_eq!(value_str(5e-324f64), "5e-324");
    assert_eq!(value_str(f64::MAX), "1.7976931348623157e+308");
}

#[test]
fn non_finite_floats_render_null() {
    assert_eq!(value_str(f64::NAN), "null");
    assert_eq!(value_str(f64::INFINITY), "null");
    assert_eq!(value_str(f64::NEG_INFINITY), "null");
    assert_eq!(value_str(f32::NAN), "null");
}

#[test]
fn float_output_round_trips() {
    for v in [
        1.2393f64,
        -3290123.94994,
        99499449.23949,
        5e-324,
        f64::MAX,
        0.1 + 0.2,
    ] {
        let out = value_str(v);
        let back: f64 = out.parse().expect("float output parses");
        assert_eq!(back.to_bits(), v.to_bits(), "{out} did not round-trip");
    }
}

#[test]
fn writes_bools_and_null() {
    assert_eq!(value_str(true), "true");
    assert_eq!(value_str(false), "false");
    assert_eq!(value_str(None::<i64>), "null");
    assert_eq!(value_str(Some(42i64)), "42");
    assert_eq!(encode(|w| w.null()), "null");
}

#[test]
fn shortcuts_match_dispatch_exactly() {
    assert_eq!(encode(|w| w.string("over\n9000")), value_str("over\n9000"));
    assert_eq!(encode(|w| w.int(-59922)), value_str(-59922i64));
    assert_eq!(encode(|w| w.uint(u64::MAX)), value_str(u64::MAX));
    assert_eq!(encode(|w| w.bool(true)), value_str(true));
    assert_eq!(encode(|w| w.float(-3290123.94994)), value_str(-3290123.94994f64));
    assert_eq!(encode(|w| w.float32(1.2393)), value_str(1.2393f32));
    assert_eq!(encode(|w| w.null()), value_str(None::<bool>));
}

#[test]
fn shortcuts_match_dispatch_inside_arrays() {
    let via_shortcuts = encode(|w| {
        let mut root = w.root_array()?;
        root.int(1)?;
        root.string("x")?;
        root.bool(false)?;
        root.end()
    });
    let via_dispatch = encode(|w| {
        let mut root = w.root_array()?;
        root.value(1i64)?;
        root.value("x")?;
        root.value(false)?;
        root.end()
    });
    assert_eq!(via_shortcuts, via_dispatch);
    assert_eq!(via_shortcuts, r#"[1,"x",false]"#);
}

#[test]
fn keyed_shortcuts_match_key_value() {
    let shortcuts = encode(|w| {
        let mut root = w.root_object()?;
        root.key_string("s", "flow")?;
        root.key_int("i", -42)?;
        root.key_uint("u", 42)?;
        root.key_bool("b", true)?;
        root.key_float("f", 1.5)?;
        root.key_float32("g", 1.5)?;
        root.end()
    });
    let dispatch = encode(|w| {
        let mut root = w.root_object()?;
        root.key_value("s", "flow")?;
        root.key_value("i", -42i64)?;
        root.key_value("u", 42u64)?;
        root.key_value("b", true)?;
        root.key_value("f", 1.5f64)?;
        root.key_value("g", 1.5f32)?;
        root.end()
    });
    assert_eq!(shortcuts, dispatch);
}

struct Marshalable;

impl ToJson for Marshalable {
    fn to_json(&self) -> Vec<u8> {
        br#"{"ok":true}"#.to_vec()
    }
}

#[test]
fn custom_values_splice_their_own_json() {
    let out = encode(|w| {
        let mut root = w.root_object()?;
        root.key_value("c", Value::Custom(&Marshalable))?;
        root.end()
    });
    assert_eq!(out, r#"{"c":{"ok":true}}"#);
}

#[test]
fn custom_values_get_array_commas() {
    let out = encode(|w| {
        let mut root = w.root_array()?;
        root.custom(&Marshalable)?;
        root.custom(&Marshalable)?;
        root.end()
    });
    assert_eq!(out, r#"[{"ok":true},{"ok":true}]"#);
}

#[cfg(feature = "json")]
#[test]
fn serde_json_values_render_through_to_json() {
    let v = serde_json::json!({"ok": true, "n": [1, 2]});
    let out = encode(|w| w.value(Value::Custom(&v)));
    assert_eq!(out, r#"{"ok":true,"n":[1,2]}"#);
}

#[test]
fn raw_variant_matches_raw_value() {
    let a = encode(|w| {
        let mut root = w.root_array()?;
        root.value(Value::Raw(b"17"))?;
        root.value(Value::Raw(b"18"))?;
        root.end()
    });
    let b = encode(|w| {
        let mut root = w.root_array()?;
        root.raw_value(b"17")?;
        root.raw_value(b"18")?;
        root.end()
    });
    assert_eq!(a, b);
    assert_eq!(a, "[17,18]");
}

#[test]
fn string_reference_conversions() {
    let owned = String::from("flow");
    assert_eq!(value_str(&owned), r#""flow""#);
    assert_eq!(value_str(owned.as_str()), r#""flow""#);
}
