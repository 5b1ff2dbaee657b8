use kotoba_text_engine::{
    break_opportunities, char_pool, fit_font_size, tokenize_sentence, FixedAdvanceMeasurer,
};

fn main() {
    println!("Testing the kotoba text engine...");

    // Chunk a few sentences, with and without a protected vocabulary term.
    let sentences = [
        ("私は学生です。", None),
        ("猫が逃げました。", Some("逃げる")),
        ("私は日本語を勉強します。", Some("日本語")),
    ];

    for (text, anchor) in sentences {
        let chunks = tokenize_sentence(text, anchor);
        match anchor {
            Some(a) => println!("{} (anchor {}) -> {:?}", text, a, chunks),
            None => println!("{} -> {:?}", text, chunks),
        }
    }

    // Soft line-break offsets for the reading view.
    let text = "私は学生です。";
    println!("break offsets for {}: {:?}", text, break_opportunities(text));

    // Letter pool for the word-builder game.
    println!("char pool for 日本語: {:?}", char_pool("日本語"));

    // Size a caption into a 300x100 box with the deterministic measurer.
    let mut measurer = FixedAdvanceMeasurer::default();
    let size = fit_font_size(&mut measurer, "こんにちは世界", 300.0, 100.0, 12, 72, false);
    println!("fitted size in a 300x100 box: {}px", size);
}
