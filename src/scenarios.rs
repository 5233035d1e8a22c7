//! End-to-end tests exercising the engine's own worked examples through
//! the public [`crate::Model`] facade, rather than against individual
//! combinators in isolation.
#![cfg(test)]

use crate::config::{Config, WordLevel};
use crate::result::ResultSet;
use crate::Model;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn train(files: &[(&str, &str)], config: Config) -> Model {
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("lre-scenario-{}-{id}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for (name, body) in files {
        let mut f = std::fs::File::create(dir.join(format!("{name}.cpt"))).unwrap();
        writeln!(f, "{body}").unwrap();
    }
    let model = Model::train(config, &dir).unwrap();
    std::fs::remove_dir_all(&dir).ok();
    model
}

fn sorted_offsets(results: &ResultSet) -> Vec<usize> {
    let mut v: Vec<usize> = results.iter().map(|m| m.beg_index.offset).collect();
    v.sort_unstable();
    v
}

#[test]
fn single_keyword_lookup() {
    let model = train(&[("a", r#"$kw("a")"#)], Config::default());
    let results = model.match_text("a b c a", None).unwrap();
    let a = results.get("a").unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(sorted_offsets(a), vec![0, 3]);
}

#[test]
fn seq_requires_adjacency() {
    let model = train(&[("ab", r#"$seq(@s1,"a","b")"#)], Config::default());
    let results = model.match_text("a b c", None).unwrap();
    let ab = results.get("ab").unwrap();
    assert_eq!(ab.len(), 1);
    let m = ab.iter().next().unwrap();
    assert_eq!((m.beg_index.offset, m.end_index.offset), (0, 1));

    let model = train(&[("ac", r#"$seq(@s1,"a","c")"#)], Config::default());
    let results = model.match_text("a b c", None).unwrap();
    assert!(results.get("ac").is_none());
}

#[test]
fn ord_allows_a_gap() {
    let model = train(&[("ab", r#"$ord(@d3,"a","b")"#)], Config::default());
    let results = model.match_text("a x b", None).unwrap();
    let ab = results.get("ab").unwrap();
    assert_eq!(ab.len(), 1);
    let m = ab.iter().next().unwrap();
    assert_eq!((m.beg_index.offset, m.end_index.offset), (0, 2));
}

#[test]
fn bag_is_order_insensitive() {
    let model = train(&[("ab", r#"$bag(@d3,"a","b")"#)], Config::default());
    let results = model.match_text("b a", None).unwrap();
    let ab = results.get("ab").unwrap();
    assert_eq!(ab.len(), 1);
    let m = ab.iter().next().unwrap();
    assert_eq!((m.beg_index.offset, m.end_index.offset), (0, 1));
}

#[test]
fn concept_cross_reference_resolves_by_name() {
    let model = train(&[("A", r#"$kw("phone")"#), ("B", r#"$or(%A,"mobile")"#)], Config::default());
    let results = model.match_text("phone mobile", None).unwrap();
    assert_eq!(results.get("A").unwrap().len(), 1);
    assert_eq!(results.get("B").unwrap().len(), 2);
}

#[test]
fn rule_filter_rejects_a_preceding_negation() {
    let model = train(&[("on", r#"!filt($kw("on"), @[d1,0,0], $kw("not"))"#)], Config::default());
    let results = model.match_text("not on", None).unwrap();
    assert!(results.get("on").is_none());
}

#[test]
fn force_concept_size_one_collapses_measured_width() {
    let cfg_on = Config::builder().word_level(WordLevel::Word).force_concept_size_one(true).build();
    let model = train(&[("安装好", r#"$seq(@s1,"安装","好")"#)], cfg_on);
    let results = model.match_text("安装 好", None).unwrap();
    let m = results.get("安装好").unwrap().iter().next().unwrap();
    assert_eq!(m.measured_word_width(), 1);
    assert_eq!(m.bias, 1);

    let cfg_off = Config::builder().word_level(WordLevel::Word).force_concept_size_one(false).build();
    let model = train(&[("安装好", r#"$seq(@s1,"安装","好")"#)], cfg_off);
    let results = model.match_text("安装 好", None).unwrap();
    let m = results.get("安装好").unwrap().iter().next().unwrap();
    assert_eq!(m.measured_word_width(), 2);
    assert_eq!(m.bias, 0);
}
