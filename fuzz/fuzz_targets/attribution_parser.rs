#![no_main]

use libfuzzer_sys::fuzz_target;
use srcspot::attribution::Attribution;
use srcspot::location::PageLocation;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsed attributions must print back to something that parses the same
        if let Ok(attribution) = input.parse::<Attribution>() {
            let again: Attribution = attribution.to_string().parse().unwrap();
            assert_eq!(again, attribution);
        }

        // Neither should panic on arbitrary input
        let location = PageLocation::parse(input);
        let _ = location.inferred_file_name();
    }
});
