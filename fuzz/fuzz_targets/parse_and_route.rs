#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (String, String)| {
    let router = match tagmatch::Router::new(&data.0) {
        Ok(router) => router,
        Err(_) => return,
    };

    let _ = router.route(&data.1);
});
