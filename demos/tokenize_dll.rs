//! Test example for the Kotoba GUI DLL
//!
//! This demonstrates how to use the DLL from Rust code,
//! which is similar to how it would be used from C# or JS glue.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use kotoba_gui_dll::{
    cleanup_fit_context, fit_font_size_ffi, free_string, init_fit_context, tokenize_sentence_ffi,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧪 Testing Kotoba GUI DLL...");

    // Test 1: Tokenization
    println!("\n📝 Test 1: Sentence tokenization");
    let text = CString::new("猫が逃げました。")?;
    let anchor = CString::new("逃げる")?;

    let mut json_ptr: *mut c_char = ptr::null_mut();
    let result = tokenize_sentence_ffi(text.as_ptr(), anchor.as_ptr(), &mut json_ptr);

    if result == 0 && !json_ptr.is_null() {
        let json = unsafe { CStr::from_ptr(json_ptr).to_string_lossy() };
        println!("✅ Sentence: 猫が逃げました。");
        println!("✅ Chunks:   {}", json);
        free_string(json_ptr);
    } else {
        println!("❌ Tokenization failed with code: {}", result);
    }

    // Test 2: Fit sizing
    println!("\n📐 Test 2: Adaptive font fit");
    let context = init_fit_context();
    if context.is_null() {
        println!("❌ Failed to initialize fit context");
        return Ok(());
    }

    let content = CString::new("日本語を勉強します")?;
    let size = fit_font_size_ffi(
        context,
        content.as_ptr(),
        320.0, // container width
        96.0,  // container height
        12,    // min font size
        72,    // max font size
        0,     // no wrapping
    );

    if size >= 0 {
        println!("✅ Fitted font size: {}px in a 320x96 box", size);
    } else {
        println!("❌ Fit sizing failed with code: {}", size);
    }

    cleanup_fit_context(context);

    println!("\n🎉 DLL test complete!");
    Ok(())
}
