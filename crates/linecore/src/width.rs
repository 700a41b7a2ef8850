//! 文字幅計算モジュール
//!
//! プロンプトと入力行の表示幅を、全角文字・絵文字・ゼロ幅文字を
//! 考慮して計算します。

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// 文字列全体の表示幅を計算
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

/// グラフェムクラスタ1つの表示幅を計算
pub fn grapheme_width(grapheme: &str) -> usize {
    // 制御文字は幅0
    if !grapheme.is_empty() && grapheme.chars().all(|c| c.is_control()) {
        return 0;
    }

    // 結合絵文字シーケンスは端末上で2マスを占める
    if grapheme.chars().count() > 1 && grapheme.chars().any(is_emoji_component) {
        return 2;
    }

    // 通常の文字はunicode_width crateに従う（結合文字は幅0）
    grapheme.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// 絵文字シーケンスの構成要素かどうかを判定
fn is_emoji_component(c: char) -> bool {
    let code = c as u32;

    // 絵文字の基本範囲
    (0x1F300..=0x1FAFF).contains(&code) ||
    // Misc Symbols / Dingbats
    (0x2600..=0x27BF).contains(&code) ||
    // ゼロ幅結合子
    c == '\u{200D}' ||
    // バリエーションセレクタ
    matches!(c, '\u{FE00}'..='\u{FE0F}')
}
