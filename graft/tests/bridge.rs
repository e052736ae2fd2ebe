//! Field-name bridging between maps and records via the `map_merge` entry
//! points.

use anyhow::{Result, anyhow, ensure};
use graft::value::{MapKey, Node, Scalar, Type};
use graft::{MergeError, map_merge, map_merge_with_overwrite};
use rstest::rstest;
use test_helpers::{complex_record, dyn_map, simple_record, simple_ty};

fn scalar_field(node: &Node, name: &str) -> Option<Scalar> {
    node.field(name).and_then(|n| n.scalar())
}

#[test]
fn a_map_entry_fills_the_field_spelling_its_name() -> Result<()> {
    let dst = simple_record(0);
    let src = dyn_map([("value", Node::int(42))]);
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        scalar_field(&dst, "value") == Some(Scalar::Int(42)),
        "field was not filled from the map"
    );
    Ok(())
}

#[test]
fn key_lookup_ignores_case() -> Result<()> {
    let dst = simple_record(0);
    let src = Node::map_with(
        Type::string(),
        Type::Any,
        [(MapKey::from("VALUE"), Node::boxed(Node::int(42)))],
    );
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        scalar_field(&dst, "value") == Some(Scalar::Int(42)),
        "upper-cased key did not match the field"
    );
    Ok(())
}

#[test]
fn an_optional_entry_is_peeled_for_a_plain_field() -> Result<()> {
    let dst = Node::record("named").field("id", Node::str("")).build();
    let src = Node::map_with(
        Type::string(),
        Type::Any,
        [(
            MapKey::from("id"),
            Node::boxed(Node::some(Type::string(), Node::str("hello"))),
        )],
    );
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        scalar_field(&dst, "id") == Some(Scalar::Str("hello".into())),
        "optional source was not unwrapped"
    );
    Ok(())
}

#[test]
fn a_map_entry_bridges_into_a_nested_record_field() -> Result<()> {
    let dst = Node::record("outer").field("st", simple_record(0)).build();
    let src = dyn_map([("st", dyn_map([("value", Node::int(42))]))]);
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    let nested = dst
        .field("st")
        .and_then(|st| st.field("value"))
        .and_then(|n| n.scalar());
    ensure!(nested == Some(Scalar::Int(42)), "nested bridge did not fill");
    Ok(())
}

#[test]
fn shape_incompatible_entries_are_skipped() -> Result<()> {
    let dst = simple_record(0);
    let src = dyn_map([("value", Node::str("not-an-int"))]);
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        scalar_field(&dst, "value") == Some(Scalar::Int(0)),
        "incompatible entry leaked into the field"
    );
    Ok(())
}

#[test]
fn exported_fields_project_into_an_empty_map() -> Result<()> {
    let dst = Node::map(Type::string(), Type::Any);
    let src = complex_record(42, 9, "athing");
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    let id = dst
        .entry(&MapKey::from("id"))
        .map(|e| e.unboxed())
        .and_then(|n| n.scalar());
    ensure!(id == Some(Scalar::Str("athing".into())), "id was not projected");
    let st = dst
        .entry(&MapKey::from("st"))
        .map(|e| e.unboxed())
        .and_then(|r| r.field("value"))
        .and_then(|n| n.scalar());
    ensure!(st == Some(Scalar::Int(42)), "nested record was not projected");
    ensure!(
        dst.entry(&MapKey::from("sz")).is_none(),
        "internal field leaked into the map"
    );
    Ok(())
}

#[test]
fn a_populated_record_entry_merges_field_wise() -> Result<()> {
    let dst = Node::map_with(
        Type::string(),
        Type::Any,
        [(MapKey::from("st"), Node::boxed(simple_record(0)))],
    );
    let src = Node::record("outer").field("st", simple_record(42)).build();
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    let entry = dst
        .entry(&MapKey::from("st"))
        .ok_or_else(|| anyhow!("entry vanished"))?;
    ensure!(entry.is_boxed(), "entry lost its dynamic box");
    let value = entry
        .unboxed()
        .field("value")
        .and_then(|n| n.scalar());
    ensure!(
        value == Some(Scalar::Int(42)),
        "populated entry was not merged field-wise: {value:?}"
    );
    Ok(())
}

#[rstest]
#[case::plain(false, 1)]
#[case::overwrite(true, 42)]
fn populated_entries_survive_unless_overwriting(
    #[case] overwrite: bool,
    #[case] expected: i64,
) -> Result<()> {
    let dst = Node::map_with(
        Type::string(),
        Type::Any,
        [(MapKey::from("value"), Node::boxed(Node::int(1)))],
    );
    let src = simple_record(42);
    if overwrite {
        map_merge_with_overwrite(&dst, &src).map_err(|e| anyhow!(e))?;
    } else {
        map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    }
    let got = dst
        .entry(&MapKey::from("value"))
        .map(|e| e.unboxed())
        .and_then(|n| n.scalar());
    ensure!(
        got == Some(Scalar::Int(expected)),
        "unexpected entry after bridge: {got:?}"
    );
    Ok(())
}

#[test]
fn a_record_survives_a_round_trip_through_a_map() -> Result<()> {
    let original = complex_record(42, 1, "athing");
    let map = Node::map(Type::string(), Type::Any);
    map_merge(&map, &original).map_err(|e| anyhow!(e))?;
    let restored = complex_record(0, 0, "");
    map_merge(&restored, &map).map_err(|e| anyhow!(e))?;
    ensure!(
        scalar_field(&restored, "id") == Some(Scalar::Str("athing".into())),
        "id did not survive the round trip"
    );
    let nested = restored
        .field("st")
        .and_then(|st| st.field("value"))
        .and_then(|n| n.scalar());
    ensure!(nested == Some(Scalar::Int(42)), "nested value lost");
    ensure!(
        scalar_field(&restored, "sz") == Some(Scalar::Int(0)),
        "internal field crossed the bridge"
    );
    Ok(())
}

#[test]
fn same_kind_arguments_fall_back_to_the_plain_merge() -> Result<()> {
    let dst = simple_record(0);
    let src = simple_record(42);
    map_merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        scalar_field(&dst, "value") == Some(Scalar::Int(42)),
        "record pair was not merged"
    );
    Ok(())
}

#[rstest]
#[case::nil_destination(Node::none(simple_ty()), dyn_map([]), MergeError::NilArguments)]
#[case::scalar_source(simple_record(1), Node::int(2), MergeError::NotSupported)]
#[case::differing_record_types(
    simple_record(1),
    Node::record("other").field("value", Node::int(2)).build(),
    MergeError::DifferentArgumentTypes
)]
fn bridge_preconditions(
    #[case] dst: Node,
    #[case] src: Node,
    #[case] expected: MergeError,
) -> Result<()> {
    match map_merge(&dst, &src) {
        Ok(()) => Err(anyhow!("expected {expected}")),
        Err(err) => {
            ensure!(err == expected, "expected {expected}, got {err}");
            Ok(())
        }
    }
}
