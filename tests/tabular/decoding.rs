use aletheia_rs::tabular::decode_table;
use aletheia_rs::{LegacyCodepage, TextDecoding};

#[test]
fn default_codepage_is_iso_8859_2() {
    let cp = LegacyCodepage::default();
    assert_eq!(cp.label(), "ISO-8859-2");

    // é, í and ó share their code points with Latin-1.
    let bytes = b"provincia,municipio\nSantiago,San Jos\xe9 de las Matas\nMonse\xf1or Nouel,Bonao\n";
    let table = decode_table(bytes, &cp).unwrap();

    assert_eq!(table.records[0].get("municipio"), Some("San José de las Matas"));
    // 0xF1 is ń in ISO-8859-2, not ñ.
    assert_eq!(table.records[1].get("provincia"), Some("Monseńor Nouel"));
}

#[test]
fn another_codepage_can_be_chosen_by_label() {
    let cp = LegacyCodepage::for_label("windows-1252").unwrap();
    assert_eq!(cp.decode(b"Monse\xf1or Nouel"), "Monseñor Nouel");

    assert!(LegacyCodepage::for_label("no-such-encoding").is_none());
}

#[test]
fn decoding_never_fails() {
    let cp = LegacyCodepage::default();
    let text = cp.decode(&[0x80, 0x9f, 0xff]);
    assert_eq!(text.chars().count(), 3);
}
