//! Merging self-referential and mutually-referential graphs.
//!
//! Every test here must terminate; a hang is as much a failure as a wrong
//! answer.

use anyhow::{Result, anyhow, ensure};
use graft::value::Node;
use graft::{merge, merge_with_overwrite};
use test_helpers::{link, link_to};

fn next_of(node: &Node) -> Option<Node> {
    node.field("next").and_then(|n| n.inner())
}

#[test]
fn nil_tail_adopts_the_source_target() -> Result<()> {
    let tail = link();
    let src = link();
    link_to(&src, &tail);
    let dst = link();
    merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        next_of(&dst).is_some_and(|n| Node::ptr_eq(&n, &tail)),
        "dst.next should share the source's target"
    );
    Ok(())
}

#[test]
fn a_circular_source_terminates_and_is_adopted() -> Result<()> {
    let src = link();
    link_to(&src, &src);
    let dst = link();
    merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        next_of(&dst).is_some_and(|n| Node::ptr_eq(&n, &src)),
        "dst.next should point into the source cycle"
    );
    ensure!(dst.structural_eq(&src), "adopted cycle should compare equal");
    Ok(())
}

#[test]
fn a_circular_destination_is_left_intact() -> Result<()> {
    let dst = link();
    link_to(&dst, &dst);
    let src = link();
    merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        next_of(&dst).is_some_and(|n| Node::ptr_eq(&n, &dst)),
        "the destination cycle was broken"
    );
    Ok(())
}

#[test]
fn two_cycles_merge_without_looping() -> Result<()> {
    let dst = link();
    link_to(&dst, &dst);
    let src = link();
    link_to(&src, &src);
    merge(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        next_of(&dst).is_some_and(|n| Node::ptr_eq(&n, &dst)),
        "the destination cycle was broken"
    );
    Ok(())
}

#[test]
fn two_cycles_merge_without_looping_under_overwrite() -> Result<()> {
    let dst = link();
    link_to(&dst, &dst);
    let src = link();
    link_to(&src, &src);
    merge_with_overwrite(&dst, &src).map_err(|e| anyhow!(e))?;
    ensure!(next_of(&dst).is_some(), "dst.next went nil");
    Ok(())
}

#[test]
fn cross_linked_destinations_terminate() -> Result<()> {
    let a = link();
    let b = link();
    link_to(&a, &b);
    link_to(&b, &a);
    let src = link();
    merge(&a, &src).map_err(|e| anyhow!(e))?;
    ensure!(
        next_of(&a).is_some_and(|n| Node::ptr_eq(&n, &b)),
        "a.next should still point at b"
    );
    ensure!(
        next_of(&b).is_some_and(|n| Node::ptr_eq(&n, &a)),
        "b.next should still point at a"
    );
    Ok(())
}
