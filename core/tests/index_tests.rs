use poisk_core::BooleanIndex;

#[test]
fn basic_insert_and_retrieve() {
    let mut index = BooleanIndex::new();

    index.add_document(1u32, &["apple", "fruit", "red"]);
    index.add_document(2, &["banana", "fruit", "yellow"]);
    index.add_document(3, &["apple", "pie", "dessert"]);

    assert_eq!(index.total_documents(), 3);
    assert_eq!(index.total_terms(), 7);

    assert_eq!(index.get_documents_for_term("apple"), vec![1, 3]);
    assert_eq!(index.get_documents_for_term("fruit"), vec![1, 2]);
    assert_eq!(index.get_documents_for_term("pie"), vec![3]);
    assert_eq!(index.get_documents_for_term("missing"), Vec::<u32>::new());
}

#[test]
fn and_query() {
    let mut index = BooleanIndex::new();

    index.add_document(1u32, &["apple", "fruit", "red"]);
    index.add_document(2, &["apple", "fruit", "green"]);
    index.add_document(3, &["apple", "pie", "dessert"]);
    index.add_document(4, &["banana", "fruit", "yellow"]);

    assert_eq!(index.and_query(&["apple", "fruit"]), vec![1, 2]);
    assert_eq!(index.and_query(&["apple", "pie"]), vec![3]);
    assert_eq!(index.and_query(&["apple", "fruit", "red"]), vec![1]);

    // Any absent term empties a conjunction.
    assert!(index.and_query(&["apple", "nonexistent"]).is_empty());
    // So does an empty term list.
    assert!(index.and_query::<&str>(&[]).is_empty());
}

#[test]
fn or_query() {
    let mut index = BooleanIndex::new();

    index.add_document(1u32, &["apple", "fruit"]);
    index.add_document(2, &["banana", "fruit"]);
    index.add_document(3, &["cherry", "fruit"]);
    index.add_document(4, &["apple", "pie"]);

    assert_eq!(index.or_query(&["apple", "banana"]), vec![1, 2, 4]);
    assert_eq!(index.or_query(&["apple", "pie"]), vec![1, 4]);

    // Absent terms are skipped rather than emptying the union.
    assert_eq!(index.or_query(&["apple", "nonexistent"]), vec![1, 4]);
    assert!(index.or_query(&["xyz", "abc"]).is_empty());
    assert!(index.or_query::<&str>(&[]).is_empty());
}

#[test]
fn and_is_subset_of_or() {
    let mut index = BooleanIndex::new();
    index.add_document(1u32, &["apple", "fruit", "red"]);
    index.add_document(2, &["apple", "fruit", "green"]);
    index.add_document(3, &["apple", "pie", "dessert"]);
    index.add_document(4, &["banana", "fruit", "yellow"]);

    let and_result = index.and_query(&["apple", "fruit"]);
    let or_result = index.or_query(&["apple", "fruit"]);
    assert!(and_result.iter().all(|doc| or_result.contains(doc)));
    assert!(and_result.len() <= index.get_term_frequency("apple"));
    assert!(and_result.len() <= index.get_term_frequency("fruit"));
}

#[test]
fn remove_document() {
    let mut index = BooleanIndex::new();

    index.add_document(1u32, &["apple", "fruit"]);
    index.add_document(2, &["apple", "pie"]);
    index.add_document(3, &["banana", "fruit"]);

    assert_eq!(index.total_documents(), 3);
    assert_eq!(index.get_term_frequency("apple"), 2);

    assert!(index.remove_document(&1, &["apple", "fruit"]));
    assert_eq!(index.total_documents(), 2);
    assert_eq!(index.get_term_frequency("apple"), 1);
    assert_eq!(index.get_documents_for_term("apple"), vec![2]);
    assert!(!index.contains_document(&1));

    // Unknown document IDs change nothing.
    assert!(!index.remove_document(&99, &["test"]));
    assert_eq!(index.total_documents(), 2);
}

#[test]
fn add_then_remove_restores_shape() {
    let mut index = BooleanIndex::new();
    index.add_document(1u32, &["apple", "fruit"]);

    let docs_before = index.total_documents();
    let apple_before = index.get_term_frequency("apple");

    index.add_document(2, &["apple", "pie"]);
    assert!(index.remove_document(&2, &["apple", "pie"]));

    assert!(!index.contains_document(&2));
    assert_eq!(index.total_documents(), docs_before);
    assert_eq!(index.get_term_frequency("apple"), apple_before);
    // Emptied posting sets are retained, not dropped.
    assert!(index.contains_term("pie"));
    assert_eq!(index.get_term_frequency("pie"), 0);
}

#[test]
fn duplicate_document_id_keeps_counter_in_sync() {
    let mut index = BooleanIndex::new();

    assert!(index.add_document(1u32, &["apple", "fruit"]));
    assert!(!index.add_document(1, &["banana", "fruit"]));

    assert_eq!(index.total_documents(), 1);
    assert!(index.contains_document(&1));
    // The second call merged its terms.
    assert_eq!(index.get_documents_for_term("banana"), vec![1]);
    assert_eq!(index.get_documents_for_term("apple"), vec![1]);
}

#[test]
fn contains_methods() {
    let mut index = BooleanIndex::new();

    index.add_document(1u32, &["apple", "fruit"]);
    index.add_document(2, &["banana", "fruit"]);

    assert!(index.contains_term("apple"));
    assert!(index.contains_term("fruit"));
    assert!(!index.contains_term("orange"));

    assert!(index.contains_document(&1));
    assert!(index.contains_document(&2));
    assert!(!index.contains_document(&3));
}

#[test]
fn get_all_terms_and_documents() {
    let mut index = BooleanIndex::new();

    index.add_document(1u32, &["apple", "fruit"]);
    index.add_document(2, &["banana", "fruit", "yellow"]);
    index.add_document(3, &["cherry", "fruit", "red"]);

    let mut all_terms = index.get_all_terms();
    all_terms.sort_unstable();
    assert_eq!(
        all_terms,
        vec!["apple", "banana", "cherry", "fruit", "red", "yellow"]
    );

    assert_eq!(index.get_all_documents(), vec![1, 2, 3]);
}

#[test]
fn empty_index() {
    let index: BooleanIndex<u32> = BooleanIndex::new();

    assert_eq!(index.total_documents(), 0);
    assert_eq!(index.total_terms(), 0);
    assert!(index.get_all_terms().is_empty());
    assert!(index.get_all_documents().is_empty());
    assert!(index.and_query(&["test"]).is_empty());
    assert!(index.or_query(&["test"]).is_empty());

    let stats = index.stats();
    assert_eq!(stats.total_documents, 0);
    assert_eq!(stats.largest_term, None);
}

#[test]
fn max_responses_caps_queries() {
    let mut index = BooleanIndex::with_max_responses(10);
    for doc_id in 0..1000u32 {
        index.add_document(
            doc_id,
            &["term_0", "term_1", "term_2", "term_3", "term_4"],
        );
    }

    let and_result = index.and_query(&["term_0", "term_1"]);
    assert_eq!(and_result, (0..10).collect::<Vec<_>>());

    let or_result = index.or_query(&["term_0", "term_4"]);
    assert_eq!(or_result.len(), 10);
}

#[test]
fn large_dataset() {
    let mut index = BooleanIndex::new();
    let num_docs = 1000u32;

    for doc_id in 0..num_docs {
        let mut terms: Vec<String> = (0..5).map(|t| format!("term_{t}")).collect();
        terms.push(format!("doc_{doc_id}"));
        index.add_document(doc_id, &terms);
    }

    assert_eq!(index.total_documents(), num_docs as usize);

    let common = index.and_query(&["term_0", "term_1"]);
    assert_eq!(common.len(), num_docs as usize);

    assert_eq!(index.and_query(&["doc_42"]), vec![42]);
    assert_eq!(index.or_query(&["doc_10", "doc_20", "doc_30"]), vec![10, 20, 30]);
}

#[test]
fn string_document_ids() {
    let mut index = BooleanIndex::new();

    index.add_document("doc1.html".to_string(), &["apple", "fruit", "computer"]);
    index.add_document("doc2.html".to_string(), &["apple", "pie", "recipe"]);
    index.add_document("doc3.html".to_string(), &["banana", "fruit", "tropical"]);

    assert_eq!(index.total_documents(), 3);
    assert_eq!(
        index.get_documents_for_term("apple"),
        vec!["doc1.html".to_string(), "doc2.html".to_string()]
    );
    assert_eq!(
        index.and_query(&["fruit", "tropical"]),
        vec!["doc3.html".to_string()]
    );
}

#[test]
fn stats_reports_extremes() {
    let mut index = BooleanIndex::new();
    index.add_document(1u32, &["common", "rare"]);
    index.add_document(2, &["common"]);
    index.add_document(3, &["common"]);

    let stats = index.stats();
    assert_eq!(stats.total_documents, 3);
    assert_eq!(stats.total_terms, 2);
    assert_eq!(stats.largest_term, Some(("common".to_string(), 3)));
    assert_eq!(stats.smallest_term, Some(("rare".to_string(), 1)));
}
