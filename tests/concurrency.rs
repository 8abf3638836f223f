use opkit::api::OpkitApi;
use opkit::commands::Engine;
use opkit::store::BufferKind;
use opkit::transform::TransformKind;
use std::thread;

const THREADS: usize = 8;
const ROUNDS: usize = 50;

fn list_for(worker: usize) -> String {
    vec![worker.to_string(); 5].join(",")
}

#[test]
fn every_result_comes_from_one_consistent_state() {
    let api = OpkitApi::new(Engine::default().with_page_size(64));
    let expected: Vec<String> = (0..THREADS).map(|w| list_for(w).replace(',', "\n")).collect();

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let api = api.clone();
            let expected = expected.clone();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    api.set_input(&list_for(worker));
                    let result = api.transform(TransformKind::FormatFlip, "");

                    // Another worker may have pasted in between, but the page must
                    // still be one whole flipped list, never a mix of two.
                    assert!(expected.contains(&result.text().to_string()));
                    assert_eq!(result.report.map(|r| r.items), Some(5));

                    let shown = api.show_page(BufferKind::Output);
                    assert!(expected.contains(&shown.text().to_string()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let final_output = api.current_output_blob();
    assert!(expected.contains(&final_output));
}

#[test]
fn paging_and_pasting_interleave_safely() {
    let api = OpkitApi::new(Engine::default().with_page_size(3));
    let long = "abcdefghijkl".to_string();

    let pager = {
        let api = api.clone();
        thread::spawn(move || {
            for page in (1..=4).cycle().take(400) {
                let result = api.goto_page(BufferKind::Input, page);
                let view = result.view.unwrap();
                assert!(view.cursor.current() <= view.cursor.total().max(1));
                assert!(view.text.chars().count() <= 3);
            }
        })
    };

    let paster = {
        let api = api.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let text = if i % 2 == 0 { long.as_str() } else { "xy" };
                api.set_input(text);
            }
        })
    };

    pager.join().unwrap();
    paster.join().unwrap();

    let cursor = api.show_page(BufferKind::Input).view.unwrap().cursor;
    assert!(cursor.current() >= 1 && cursor.current() <= cursor.total());
}
