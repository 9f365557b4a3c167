use std::{
    io::{
        self,
        BufRead,
        Write,
    },
    sync::Arc,
    time::Duration,
};

use tokio::runtime::Runtime;

use lexicard::{
    AppConfig,
    Difficulty,
    FileStore,
    HttpGateway,
    Session,
    SessionView,
    StatsSummary,
    WordList,
};

fn main() {
    env_logger::init();

    let config = AppConfig::load();

    let words = match &config.word_list_file {
        Some(path) => match WordList::from_file(path) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("{}. Falling back to the built-in word list.", e);
                WordList::default_list()
            }
        },
        None => WordList::default_list(),
    };

    let gateway = match HttpGateway::new(
        &config.gateway_url,
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            eprintln!("Failed to set up the generation client: {}", e);
            return;
        }
    };

    let store = Arc::new(FileStore::new());
    let session = Session::new(words, gateway, store);

    let runtime = Runtime::new().expect("Failed to create session runtime");

    println!("lexicard: [Enter]/n next, f flip, e/g/h grade, s stats, r reset, q quit");
    runtime.block_on(session.start());
    print_card(&session.view());

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }

        match line.trim() {
            "" | "n" => {
                runtime.block_on(session.advance());
                print_card(&session.view());
            }
            "f" => {
                session.toggle_flip();
                print_card(&session.view());
            }
            "e" => grade(&runtime, &session, Difficulty::Easy),
            "g" => grade(&runtime, &session, Difficulty::Good),
            "h" => grade(&runtime, &session, Difficulty::Hard),
            "s" => print_summary(&session.stats_summary()),
            "r" => {
                runtime.block_on(session.reset());
                print_card(&session.view());
            }
            "q" => break,
            other => println!("Unknown command: {:?}", other),
        }
    }
}

fn grade(runtime: &Runtime, session: &Session, difficulty: Difficulty) {
    runtime.block_on(session.submit_feedback(difficulty));
    print_card(&session.view());
}

fn print_card(view: &SessionView) {
    println!(
        "\n[{} / {} — {:.0}%] {}",
        view.word_index + 1,
        view.total_words,
        view.progress_percent,
        view.word
    );

    if view.is_loading {
        println!("  generating…");
        return;
    }

    if let Some(error) = &view.error {
        println!("  ! {}", error);
        return;
    }

    let Some(content) = &view.content else {
        return;
    };

    println!("  {}", content.ipa);
    println!("  {}", content.english_definition);
    if !content.english_synonyms.is_empty() {
        println!("  synonyms: {}", content.english_synonyms.join(", "));
    }
    if !content.english_antonyms.is_empty() {
        println!("  antonyms: {}", content.english_antonyms.join(", "));
    }
    for example in &content.english_examples {
        println!("  • {}", example);
    }

    if view.is_flipped {
        println!("  --------");
        println!("  {} ({})", content.persian_translation, content.persian_phonetic);
        if !content.persian_synonyms.is_empty() {
            println!("  synonyms: {}", content.persian_synonyms.join("، "));
        }
        if !content.persian_antonyms.is_empty() {
            println!("  antonyms: {}", content.persian_antonyms.join("، "));
        }
        for example in &content.persian_examples {
            println!("  • {}", example);
        }
        if let Some(note) = &content.extra_note {
            println!("  note: {}", note);
        }
    }
}

fn print_summary(summary: &StatsSummary) {
    println!(
        "\nreviewed {} — easy {}, good {}, hard {} ({}% complete)",
        summary.reviewed, summary.easy, summary.good, summary.hard, summary.completion_percent
    );
}
