use std::io::Write;

use jsonwriter::{JsonWriter, Result};

fn encode(f: impl FnOnce(&mut JsonWriter<Vec<u8>>) -> Result<()>) -> String {
    let bytes = jsonwriter::to_vec(f).expect("in-memory sink cannot fail");
    String::from_utf8(bytes).expect("writer output is UTF-8")
}

#[test]
fn dropping_a_scope_closes_the_container() {
    let out = encode(|w| {
        {
            let mut root = w.root_object()?;
            root.key_value("a", 1)?;
        }
        Ok(())
    });
    assert_eq!(out, r#"{"a":1}"#);
}

#[test]
fn nested_scopes_close_innermost_first() {
    let out = encode(|w| {
        {
            let mut root = w.root_object()?;
            let mut xs = root.key_array("xs")?;
            xs.value(1)?;
        }
        Ok(())
    });
    assert_eq!(out, r#"{"xs":[1]}"#);
}

fn emit_prefix<W: Write>(w: &mut JsonWriter<W>, stop_early: bool) -> Result<()> {
    let mut root = w.root_array()?;
    root.int(1)?;
    if stop_early {
        return Ok(());
    }
    root.int(2)?;
    root.end()
}

#[test]
fn early_return_still_closes() {
    assert_eq!(encode(|w| emit_prefix(w, true)), "[1]");
    assert_eq!(encode(|w| emit_prefix(w, false)), "[1,2]");
}

#[test]
fn explicit_end_is_equivalent_to_drop() {
    let dropped = encode(|w| {
        {
            let mut root = w.root_array()?;
            root.value("x")?;
        }
        Ok(())
    });
    let ended = encode(|w| {
        let mut root = w.root_array()?;
        root.value("x")?;
        root.end()
    });
    assert_eq!(dropped, ended);
}

#[test]
fn n_siblings_get_n_minus_one_commas() {
    for n in 1..6i64 {
        let out = encode(|w| {
            let mut root = w.root_array()?;
            for i in 0..n {
                root.int(i)?;
            }
            root.end()
        });
        assert_eq!(out.matches(',').count() as i64, n - 1, "for {out}");
        assert!(!out.contains(", "), "no whitespace around commas in {out}");
    }
}

#[test]
fn depth_is_inspectable_through_scopes() {
    let mut w = JsonWriter::new(Vec::new());
    assert_eq!(w.depth(), 0);
    let mut root = w.root_object().unwrap();
    assert_eq!(root.depth(), 1);
    let inner = root.key_array("a").unwrap();
    assert_eq!(inner.depth(), 2);
    inner.end().unwrap();
    assert_eq!(root.depth(), 1);
    root.end().unwrap();
    assert_eq!(w.depth(), 0);
}

#[test]
fn document_balances_at_every_depth() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let out = encode(|w| {
        let mut root = w.root_object()?;
        let mut level = root.key_object("one")?;
        let mut two = level.key_object("two")?;
        let mut three = two.key_array("three")?;
        three.value(0)?;
        three.end()?;
        two.end()?;
        level.end()?;
        root.end()
    });
    let parsed: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(parsed["one"]["two"]["three"][0], 0);
    Ok(())
}
