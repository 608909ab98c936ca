use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use garden::{
    build_directory_tree, create_path, get_parent_path, get_path_name, Directory, Note, NoteKind,
};

fn note(id: &str, path: &str, minute: i64) -> Note {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Note {
        id: id.to_string(),
        title: format!("title {}", id),
        content: String::new(),
        path: path.to_string(),
        kind: if minute % 2 == 0 { NoteKind::Blog } else { NoteKind::Note },
        created_at: base,
        updated_at: base + Duration::minutes(minute),
    }
}

fn sample() -> Vec<Note> {
    vec![
        note("1", "/", 3),
        note("2", "/blog", 1),
        note("3", "/blog", 7),
        note("4", "/blog/2024", 2),
        note("5", "/notes/rust/traits", 4),
        note("6", "/notes", 9),
        note("7", "/Archive", 5),
        note("8", "/notes/rust", 6),
        note("9", "/blog/2023", 8),
        note("10", "//", 10),
    ]
}

/// Deterministic permutations: rotations and reversals of the sample.
fn permutations(notes: &[Note]) -> Vec<Vec<Note>> {
    let mut result = Vec::new();
    for shift in 0..notes.len() {
        let mut rotated = notes.to_vec();
        rotated.rotate_left(shift);
        result.push(rotated.clone());
        rotated.reverse();
        result.push(rotated);
    }
    result
}

#[test]
fn every_note_appears_exactly_once() {
    let notes = sample();
    let tree = build_directory_tree(&notes);

    let mut seen: HashMap<String, usize> = HashMap::new();
    for (_, dir) in tree.walk() {
        for n in &dir.notes {
            *seen.entry(n.id.clone()).or_default() += 1;
        }
    }
    assert_eq!(seen.len(), notes.len());
    assert!(seen.values().all(|&count| count == 1));
    assert_eq!(tree.note_count(), notes.len());
}

#[test]
fn notes_sit_in_the_directory_matching_their_path() {
    let tree = build_directory_tree(&sample());
    for (_, dir) in tree.walk() {
        for n in &dir.notes {
            assert_eq!(garden::normalize_path(&n.path), dir.path);
        }
    }
}

#[test]
fn children_sorted_and_notes_newest_first_everywhere() {
    let tree = build_directory_tree(&sample());
    for (_, dir) in tree.walk() {
        let names: Vec<String> = dir.children.iter().map(|c| c.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted, "children of {} out of order", dir.path);

        assert!(dir
            .notes
            .windows(2)
            .all(|pair| pair[0].updated_at >= pair[1].updated_at));
    }
}

#[test]
fn permuted_input_builds_same_shape() {
    let notes = sample();
    let expected = shape(&build_directory_tree(&notes));
    for permuted in permutations(&notes) {
        assert_eq!(shape(&build_directory_tree(&permuted)), expected);
    }
}

#[test]
fn distinct_timestamps_make_permutations_fully_equal() {
    let notes = sample();
    let expected = build_directory_tree(&notes);
    for permuted in permutations(&notes) {
        assert_eq!(build_directory_tree(&permuted), expected);
    }
    assert_eq!(build_directory_tree(&notes), build_directory_tree(&notes));
}

#[test]
fn blog_scenario_from_four_notes() {
    let notes = vec![
        note("a", "/", 0),
        note("b", "/blog", 1),
        note("c", "/blog", 2),
        note("d", "/blog/2024", 3),
    ];
    let tree = build_directory_tree(&notes);
    assert_eq!(tree.notes.len(), 1);
    assert_eq!(tree.children.len(), 1);

    let blog = &tree.children[0];
    assert_eq!((blog.name.as_str(), blog.path.as_str()), ("blog", "/blog"));
    assert_eq!(blog.notes.len(), 2);
    assert_eq!(blog.children.len(), 1);
    assert_eq!(blog.children[0].path, "/blog/2024");
    assert_eq!(blog.children[0].notes[0].id, "d");
}

#[test]
fn later_update_comes_first() {
    let tree = build_directory_tree(&[note("older", "/p", 1), note("newer", "/p", 2)]);
    let ids: Vec<&str> = tree.children[0].notes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "older"]);
}

#[test]
fn directories_vanish_when_their_notes_move() {
    let mut notes = vec![note("1", "/drafts/old", 0), note("2", "/kept", 1)];
    assert!(build_directory_tree(&notes).find("/drafts/old").is_some());

    notes[0].path = "/kept".to_string();
    let tree = build_directory_tree(&notes);
    assert!(tree.find("/drafts").is_none());
    assert_eq!(tree.children.len(), 1);
}

#[test]
fn path_helpers_round_trip_through_tree_paths() {
    let tree = build_directory_tree(&sample());
    for (_, dir) in tree.walk().filter(|(_, d)| !d.is_root()) {
        let parent = get_parent_path(&dir.path);
        assert_eq!(create_path(&parent, &dir.name), dir.path);
        assert_eq!(get_path_name(&dir.path), dir.name);
        assert!(tree.find(&parent).is_some());
    }
}

/// Tree shape without note order: (path, sorted note ids) per directory.
fn shape(tree: &Directory) -> Vec<(String, Vec<String>)> {
    tree.walk()
        .map(|(_, dir)| {
            let mut ids: Vec<String> = dir.notes.iter().map(|n| n.id.clone()).collect();
            ids.sort();
            (dir.path.clone(), ids)
        })
        .collect()
}
