// src/extract/fixtures.rs

/// A verification result page as the site renders it for one registration.
pub const RESULT_PAGE: &str = r#"
<!DOCTYPE html>
<html><body>
<div class="container">
  <table class="table table-bordered">
    <tr><th>Registration Date</th><th>Registration Office</th><th>Issuance Date</th><th>Office Address</th></tr>
    <tr>
      <td>12 March 2009</td>
      <td>DHAKA NORTH CITY CORPORATION</td>
      <td>14 march 2009</td>
      <td>ZONE-2, MIRPUR, dhaka</td>
    </tr>
    <tr><th>Date of Birth</th><th>Birth Registration Number</th><th>Sex</th></tr>
    <tr><td>5 May 1990</td><td>19902692512345678</td><td>MALE</td></tr>
  </table>
  <table class="table table-bordered">
    <tr><td>নিবন্ধিত ব্যক্তির নাম</td><td>মোঃ আব্দুল করিম</td><td>Registered Person Name</td><td>MD. ABDUL KARIM</td></tr>
    <tr><td>জন্মস্থান</td><td>মিরপুর, ঢাকা</td><td>Place of Birth</td><td>MIRPUR, DHAKA</td></tr>
    <tr><td>মাতার নাম</td><td>রহিমা খাতুন</td><td>Mother's Name</td><td>RAHIMA KHATUN</td></tr>
    <tr><td>মাতার জাতীয়তা</td><td>বাংলাদেশী</td><td>Mother's Nationality</td><td>BANGLADESHI</td></tr>
    <tr><td>পিতার নাম</td><td>আব্দুর রহমান</td><td>Father's Name</td><td>ABDUR RAHMAN</td></tr>
    <tr><td>পিতার জাতীয়তা</td><td>বাংলাদেশী</td><td>Father's Nationality</td><td>BANGLADESHI</td></tr>
  </table>
</div>
</body></html>
"#;
