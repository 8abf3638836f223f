//! Property-based invariant tests for the transform engine.
//!
//! 1. Encrypt then decrypt restores a list of canonical integers.
//! 2. Quoting and unquoting are idempotent per token.
//! 3. Unquoting undoes quoting.
//! 4. Batch size never changes a result.
//! 5. Pages reassemble the blob exactly.
//! 6. Token transforms keep the list's delimiter.

use opkit::batch::BatchProcessor;
use opkit::codec::Codec;
use opkit::pager::{paginate, render_page, PageCursor};
use opkit::tokenize::tokenize;
use opkit::transform::{add_quotes, is_quoted, strip_quotes, TransformKind};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn token_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9'，]{1,10}"
}

fn list_strategy() -> impl Strategy<Value = (Vec<String>, bool)> {
    (prop::collection::vec(token_strategy(), 0..40), any::<bool>())
}

fn join((tokens, newline): &(Vec<String>, bool)) -> String {
    tokens.join(if *newline { "\n" } else { "," })
}

fn kind_strategy() -> impl Strategy<Value = TransformKind> {
    prop::sample::select(TransformKind::ALL.to_vec())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Encrypt/decrypt round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn encrypt_decrypt_round_trip(
        numbers in prop::collection::vec(any::<i64>(), 1..30),
        newline in any::<bool>(),
    ) {
        let codec = Codec::default();
        let batch = BatchProcessor::default();
        let sep = if newline { "\n" } else { "," };
        let text = numbers.iter().map(i64::to_string).collect::<Vec<_>>().join(sep);

        let encrypted = batch.run(&codec, TransformKind::Encrypt, &text);
        let decrypted = batch.run(&codec, TransformKind::Decrypt, &encrypted.text);
        prop_assert_eq!(decrypted.text, text);

        let non_negative = numbers.iter().filter(|n| **n >= 0).count();
        prop_assert_eq!(encrypted.report.mapped, non_negative);
    }

    #[test]
    fn encoded_ids_respect_min_length(n in 0u64..=i64::MAX as u64) {
        let codec = Codec::default();
        let id = codec.encode(n);
        prop_assert!(id.chars().count() >= codec.min_length());
        prop_assert_eq!(codec.decode(&id), Some(vec![n]));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Quoting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_quotes_is_idempotent(token in token_strategy()) {
        let once = add_quotes(&token).into_text(&token).into_owned();
        prop_assert!(is_quoted(&once));
        prop_assert!(!add_quotes(&once).is_mapped());
    }

    #[test]
    fn strip_quotes_is_idempotent(token in token_strategy()) {
        let once = strip_quotes(&token).into_text(&token).into_owned();
        prop_assert!(!strip_quotes(&once).is_mapped(), "{:?} stripped twice", token);
    }

    #[test]
    fn strip_undoes_add(token in token_strategy()) {
        prop_assume!(!is_quoted(&token));
        let quoted = add_quotes(&token).into_text(&token).into_owned();
        let back = strip_quotes(&quoted).into_text(&quoted).into_owned();
        prop_assert_eq!(back, token);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Chunk invariance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn batch_size_does_not_change_output(
        list in list_strategy(),
        kind in kind_strategy(),
        a in 1usize..8,
        b in 8usize..2000,
    ) {
        let codec = Codec::default();
        let text = join(&list);
        let small = BatchProcessor::new(a).run(&codec, kind, &text);
        let large = BatchProcessor::new(b).run(&codec, kind, &text);
        prop_assert_eq!(small, large);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Pagination coverage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pages_reassemble_blob(blob in "\\PC{0,200}", page_size in 1usize..50) {
        let len = blob.chars().count();
        let mut cursor = PageCursor::for_len(len, page_size);
        prop_assert_eq!(cursor.total(), paginate(len, page_size));

        let mut rebuilt = String::new();
        for page in 1..=cursor.total() {
            prop_assert!(cursor.goto(page));
            let text = render_page(&blob, &cursor, page_size);
            let count = text.chars().count();
            if page < cursor.total() {
                prop_assert_eq!(count, page_size);
            } else {
                prop_assert!(count >= 1 && count <= page_size);
            }
            rebuilt.push_str(text);
        }
        prop_assert_eq!(rebuilt, blob);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Delimiter preservation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn token_transforms_keep_delimiter(list in list_strategy()) {
        prop_assume!(list.0.len() >= 2);
        let codec = Codec::default();
        let text = join(&list);
        let (kept, other) = if list.1 { ('\n', ',') } else { (',', '\n') };

        for kind in [TransformKind::Encrypt, TransformKind::Decrypt, TransformKind::AddQuotes] {
            let out = BatchProcessor::default().run(&codec, kind, &text);
            prop_assert!(!out.text.contains(other), "{} switched delimiter", kind);
            prop_assert_eq!(
                out.text.matches(kept).count(),
                list.0.len() - 1,
                "{} changed the token count",
                kind
            );
            prop_assert_eq!(tokenize(&out.text).len(), list.0.len());
        }
    }
}
