use snowflaked::sync::Generator;

const INSTANCE: u16 = 0;

pub static EVENT: Generator = Generator::new_unchecked(INSTANCE);
pub static REGISTRATION: Generator = Generator::new_unchecked(INSTANCE);
pub static BRACKET: Generator = Generator::new_unchecked(INSTANCE);
pub static BOUT: Generator = Generator::new_unchecked(INSTANCE);
pub static FIGHT: Generator = Generator::new_unchecked(INSTANCE);
pub static SUSPENSION: Generator = Generator::new_unchecked(INSTANCE);
pub static USER: Generator = Generator::new_unchecked(INSTANCE);
