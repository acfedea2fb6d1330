#![no_main]

use classpatch::classfile::{ConstantPoolPatcher, PatchOutcome};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let patcher = ConstantPoolPatcher::new(data.to_vec());
    for record in patcher.constants().into_iter().flatten() {
        if record.is_err() {
            break;
        }
    }

    if let Ok(PatchOutcome::Patched { data: patched, location }) =
        patcher.patch_utf8("java/lang/System", "classpatch/exec/CaptureSystem")
    {
        let expected = data.len() as isize + location.shift();
        assert_eq!(patched.len() as isize, expected);
    }
});
